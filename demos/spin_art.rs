use blockgibbs::prelude::*;
use tracing_subscriber::filter::LevelFilter;

fn square_lattice(size: usize) -> (Vec<Node>, Vec<Edge>) {
    let nodes = Node::range(size * size);
    let f = |i: usize, j: usize| nodes[i * size + j];
    let mut edges = vec![];
    for i in 0..size {
        for j in 0..size {
            if i + 1 < size {
                edges.push((f(i, j), f(i + 1, j)));
            }
            if j + 1 < size {
                edges.push((f(i, j), f(i, j + 1)));
            }
        }
    }
    (nodes, edges)
}

/// Cells of a `size` by `size` grid colored by the parity of `i + j`. Lattice neighbors always
/// differ in color, so neither block holds an edge.
fn checkerboard(nodes: &[Node], size: usize) -> Result<Vec<Block>, BindingError> {
    (0..2)
        .map(|parity| {
            let cells = nodes
                .iter()
                .enumerate()
                .filter(|(k, _)| (k / size + k % size) % 2 == parity)
                .map(|(_, n)| *n)
                .collect();
            Block::new(cells)
        })
        .collect()
}

fn make_spin_art(size: usize, beta: f64, weight: f64) -> Result<Vec<bool>, SamplingError> {
    let (nodes, edges) = square_lattice(size);
    let biases = vec![0.0; nodes.len()];
    let weights = vec![weight; edges.len()];
    let model = IsingEBM::new(nodes.clone(), edges, biases, weights, beta)?;

    let program = SamplingProgram::new(model, checkerboard(&nodes, size)?, vec![])?;
    assert!((0..2).all(|b| program.conflicting_edges(b).is_empty()));

    let (k_init, k_sample) = RngKey::new(0).split_two();
    let init = hinton_init(k_init, program.model());
    let schedule = SamplingSchedule::new(100, 1, 3)?;

    let mut samples = sample_states(
        k_sample,
        &program,
        &schedule,
        &init,
        &[],
        &[Block::new(nodes)?],
    )?;
    Ok(samples.remove(0).remove(0))
}

fn main() -> Result<(), SamplingError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::WARN)
        .with_target(false)
        .init();

    let size = 12;
    let art = make_spin_art(size, 1.2, 1.0)?;
    for row in art.chunks(size) {
        let line = row
            .iter()
            .map(|s| if *s { "\u{2b1c}" } else { "\u{2b1b}" })
            .collect::<String>();
        println!("{}", line);
    }
    Ok(())
}
