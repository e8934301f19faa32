use blockgibbs::prelude::*;

fn square_lattice(size: usize, weight: f64, beta: f64) -> IsingEBM {
    let f = |i: usize, j: usize| i * size + j;
    let mut edges = vec![];
    for i in 0..size {
        for j in 0..size {
            if i + 1 < size {
                edges.push(((f(i, j), f(i + 1, j)), weight));
            }
            if j + 1 < size {
                edges.push(((f(i, j), f(i, j + 1)), weight));
            }
        }
    }
    IsingEBM::from_weighted_edges(size * size, &edges, vec![0.0; size * size], beta).unwrap()
}

/// Even and odd cells of a checkerboard, which share no edge.
fn checkerboard(size: usize) -> Vec<Block> {
    let color = |parity: usize| {
        let nodes = (0..size * size)
            .filter(|k| (k / size + k % size) % 2 == parity)
            .map(Node)
            .collect();
        Block::new(nodes).unwrap()
    };
    vec![color(0), color(1)]
}

fn block(ids: &[usize]) -> Block {
    Block::new(ids.iter().cloned().map(Node).collect()).unwrap()
}

#[test]
fn same_key_same_samples() {
    let program =
        SamplingProgram::new(square_lattice(6, 1.0, 0.4), checkerboard(6), vec![]).unwrap();
    let schedule = SamplingSchedule::new(20, 5, 3).unwrap();
    let init = hinton_init(RngKey::new(1), program.model());
    let all = [Block::new(Node::range(36)).unwrap()];

    let a = sample_states(RngKey::new(9), &program, &schedule, &init, &[], &all).unwrap();
    let b = sample_states(RngKey::new(9), &program, &schedule, &init, &[], &all).unwrap();
    assert_eq!(a, b);

    let c = sample_states(RngKey::new(10), &program, &schedule, &init, &[], &all).unwrap();
    assert_ne!(a, c);
}

#[test]
fn schedule_shape() {
    let program =
        SamplingProgram::new(square_lattice(4, 1.0, 1.0), checkerboard(4), vec![]).unwrap();
    let schedule = SamplingSchedule::new(0, 5, 1).unwrap();
    let init = vec![true; 16];
    let out_blocks = [block(&[0, 5, 10]), block(&[3]), Block::new(Node::range(16)).unwrap()];
    let samples =
        sample_states(RngKey::new(0), &program, &schedule, &init, &[], &out_blocks).unwrap();
    assert_eq!(samples.len(), 3);
    for (block_samples, b) in samples.iter().zip(out_blocks.iter()) {
        assert_eq!(block_samples.len(), 5);
        assert!(block_samples.iter().all(|s| s.len() == b.len()));
    }
    // Projections agree with the full state.
    for (t, full) in samples[2].iter().enumerate() {
        assert_eq!(samples[0][t], vec![full[0], full[5], full[10]]);
        assert_eq!(samples[1][t], vec![full[3]]);
    }
}

#[test]
fn first_sample_is_first_sweep() {
    let model = IsingEBM::from_weighted_edges(2, &[((0, 1), 0.8)], vec![0.3, -0.2], 1.5).unwrap();
    let program = SamplingProgram::new(model, vec![block(&[0]), block(&[1])], vec![]).unwrap();
    let schedule = SamplingSchedule::new(0, 1, 1).unwrap();
    let key = RngKey::new(31);
    let init = vec![false, true];

    let samples = sample_states(key, &program, &schedule, &init, &[], &[block(&[0, 1])]).unwrap();

    // With no warmup, one sample, one step: the sampling key is used for the only sweep.
    let (_, sample_key) = key.split_two();
    let mut state = init.clone();
    sample_blocks(sample_key, &program, &mut state);
    assert_eq!(samples[0], vec![state]);
}

#[test]
fn clamped_values_never_change() {
    let size = 5;
    let model = square_lattice(size, 1.0, 2.0);
    let boards = checkerboard(size);
    // Clamp the top row, sample everything else.
    let top = (0..size).collect::<Vec<_>>();
    let free = boards
        .iter()
        .map(|b| Block::new(b.iter().filter(|n| n.id() >= size).cloned().collect()).unwrap())
        .collect::<Vec<_>>();
    let clamped = vec![block(&top)];
    let program = SamplingProgram::new(model, free, clamped.clone()).unwrap();

    let clamp_values = vec![vec![true, false, true, true, false]];
    let init = vec![false; size * size];
    let schedule = SamplingSchedule::new(10, 50, 1).unwrap();
    let samples =
        sample_states(RngKey::new(4), &program, &schedule, &init, &clamp_values, &clamped).unwrap();
    assert_eq!(samples[0].len(), 50);
    assert!(samples[0].iter().all(|s| *s == clamp_values[0]));
}

#[test]
fn background_nodes_keep_initial_value() {
    // Node 1 sits between two free nodes but belongs to no block.
    let model =
        IsingEBM::from_weighted_edges(3, &[((0, 1), 1.0), ((1, 2), 1.0)], vec![0.0; 3], 1.0)
            .unwrap();
    let program = SamplingProgram::new(model, vec![block(&[0, 2])], vec![]).unwrap();
    assert_eq!(program.background_nodes(), vec![Node(1)]);

    let schedule = SamplingSchedule::new(5, 200, 1).unwrap();
    for init_value in [true, false] {
        let init = vec![!init_value, init_value, !init_value];
        let samples =
            sample_states(RngKey::new(8), &program, &schedule, &init, &[], &[block(&[1])]).unwrap();
        assert!(samples[0].iter().all(|s| s[0] == init_value));
    }
}

#[test]
fn checkerboard_blocks_are_independent() {
    let size = 6;
    let program =
        SamplingProgram::new(square_lattice(size, 1.0, 1.0), checkerboard(size), vec![]).unwrap();
    let model = program.model();
    let state = hinton_init(RngKey::new(3), model);
    for (b, blk) in program.free_blocks().iter().enumerate() {
        assert!(program.conflicting_edges(b).is_empty());
        // Flipping any other node in the block leaves each node's conditional unchanged, so the
        // joint block update factorizes over its nodes.
        for node in blk.iter() {
            let p = model.conditional_probability(node, &state).unwrap();
            for other in blk.iter().filter(|o| *o != node) {
                let mut flipped = state.clone();
                let k = model.node_index(other).unwrap();
                flipped[k] = !flipped[k];
                assert_eq!(model.conditional_probability(node, &flipped).unwrap(), p);
            }
        }
    }
}

#[test]
fn checkerboard_coloring_on_even_grid() {
    let size = 12;
    let program =
        SamplingProgram::new(square_lattice(size, 1.0, 1.2), checkerboard(size), vec![]).unwrap();
    assert_eq!(program.free_blocks()[0].len(), 72);
    assert!(program.conflicting_edges(0).is_empty());
    assert!(program.conflicting_edges(1).is_empty());
    assert!(program.background_nodes().is_empty());

    // Alternating in row-major order is not a coloring when the row length is even: a node and
    // the one below it share a parity.
    let nodes = Node::range(size * size);
    let even = Block::new(nodes.iter().step_by(2).cloned().collect()).unwrap();
    let odd = Block::new(nodes.iter().skip(1).step_by(2).cloned().collect()).unwrap();
    let striped =
        SamplingProgram::new(square_lattice(size, 1.0, 1.2), vec![even, odd], vec![]).unwrap();
    assert_eq!(striped.conflicting_edges(0).len(), 66);
    assert_eq!(striped.conflicting_edges(1).len(), 66);
    assert_eq!(striped.conflicting_edges(0)[0], (Node(0), Node(12)));
}

#[test]
fn two_spin_boltzmann_distribution() {
    // P(s1, s2) ~ exp(b w s1 s2), for w = b = 1: P(aligned) = e / (e + 1/e).
    let model = IsingEBM::from_weighted_edges(2, &[((0, 1), 1.0)], vec![0.0; 2], 1.0).unwrap();
    let program = SamplingProgram::new(model, vec![block(&[0]), block(&[1])], vec![]).unwrap();
    let schedule = SamplingSchedule::new(100, 20000, 1).unwrap();
    let samples = sample_states(
        RngKey::new(12345),
        &program,
        &schedule,
        &[true, false],
        &[],
        &[block(&[0, 1])],
    )
    .unwrap();

    let mut counts = [0usize; 4];
    for s in samples[0].iter() {
        counts[(s[0] as usize) * 2 + s[1] as usize] += 1;
    }
    let n = schedule.n_samples as f64;
    let freq = counts.iter().map(|c| *c as f64 / n).collect::<Vec<_>>();
    let e = 1f64.exp();
    let aligned = e / (e + 1.0 / e);
    // (-,-), (-,+), (+,-), (+,+)
    assert!((freq[0] - aligned / 2.0).abs() < 0.03, "{:?}", freq);
    assert!((freq[3] - aligned / 2.0).abs() < 0.03, "{:?}", freq);
    assert!((freq[1] - (1.0 - aligned) / 2.0).abs() < 0.03, "{:?}", freq);
    assert!((freq[2] - (1.0 - aligned) / 2.0).abs() < 0.03, "{:?}", freq);
    assert!(freq[0].min(freq[3]) > freq[1].max(freq[2]));
}

#[test]
fn beta_zero_samples_are_uniform() {
    let program =
        SamplingProgram::new(square_lattice(4, 5.0, 0.0), checkerboard(4), vec![]).unwrap();
    let schedule = SamplingSchedule::new(0, 10000, 1).unwrap();
    let (first, second) = estimate_moments(
        RngKey::new(77),
        &program,
        &schedule,
        &[true; 16],
        &[],
        &[Node(0), Node(5)],
        &[(Node(0), Node(1))],
    )
    .unwrap();
    assert!(first.iter().all(|m| m.abs() < 0.06), "{:?}", first);
    assert!(second[0].abs() < 0.06, "{:?}", second);
}

#[test]
fn bad_schedule_is_rejected() {
    let program =
        SamplingProgram::new(square_lattice(2, 1.0, 1.0), checkerboard(2), vec![]).unwrap();
    let schedule = SamplingSchedule {
        n_warmup: 1,
        n_samples: 0,
        steps_per_sample: 1,
    };
    let err = sample_states(RngKey::new(0), &program, &schedule, &[true; 4], &[], &[]).unwrap_err();
    assert_eq!(err, SamplingError::Schedule(ScheduleError::NoSamples));
}

#[test]
fn binding_errors_on_run() {
    let program = SamplingProgram::new(
        square_lattice(2, 1.0, 1.0),
        vec![block(&[0, 3])],
        vec![block(&[1, 2])],
    )
    .unwrap();
    let schedule = SamplingSchedule::new(0, 1, 1).unwrap();
    let all = [Block::new(Node::range(4)).unwrap()];
    let init = [true; 4];
    let clamp = [vec![true, false]];

    let err = sample_states(RngKey::new(0), &program, &schedule, &init, &[], &all).unwrap_err();
    assert_eq!(
        err,
        SamplingError::Binding(BindingError::ClampBlockCount {
            expected: 1,
            got: 0
        })
    );

    let err =
        sample_states(RngKey::new(0), &program, &schedule, &init, &[vec![true]], &all).unwrap_err();
    assert!(matches!(
        err,
        SamplingError::Binding(BindingError::ClampBlockLength { block: 0, .. })
    ));

    let err = sample_states(RngKey::new(0), &program, &schedule, &init, &clamp, &[block(&[7])])
        .unwrap_err();
    assert_eq!(err, SamplingError::Binding(BindingError::UnknownNode(Node(7))));

    let err =
        sample_states(RngKey::new(0), &program, &schedule, &[true; 3], &clamp, &all).unwrap_err();
    assert_eq!(
        err,
        SamplingError::Binding(BindingError::StateLength {
            expected: 4,
            got: 3
        })
    );

    assert!(sample_states(RngKey::new(0), &program, &schedule, &init, &clamp, &all).is_ok());
}

#[test]
fn strong_field_saturates_samples() {
    let model = IsingEBM::from_weighted_edges(3, &[], vec![1.0, -1.0, 0.5], 1000.0).unwrap();
    let program = SamplingProgram::new(model, vec![block(&[0, 1, 2])], vec![]).unwrap();
    let schedule = SamplingSchedule::new(0, 10, 1).unwrap();
    let samples = sample_states(
        RngKey::new(6),
        &program,
        &schedule,
        &[false, true, false],
        &[],
        &[block(&[0, 1, 2])],
    )
    .unwrap();
    assert!(samples[0].iter().all(|s| *s == vec![true, false, true]));
}
