use kinetype::{
    Fps, GlyphKind, RotationDef, ScrambleTuning, Scrambler, WordRotation, WordsDef,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn def(words: &str, interval_ms: u64, seed: u64) -> RotationDef {
    RotationDef {
        words: WordsDef::Csv(words.to_owned()),
        interval_ms,
        fps: Fps { num: 60, den: 1 },
        seed,
        ..RotationDef::default()
    }
}

/// Drive a rotation until its completed count increases, returning the number
/// of delay ticks observed before the transition's first rendered frame.
fn drive_one_transition(rot: &mut WordRotation) -> u64 {
    let before = rot.transitions_completed();
    let mut delay_ticks = 0u64;
    for _ in 0..100_000 {
        if rot.transitions_completed() > before {
            return delay_ticks;
        }
        if rot.tick().is_none() {
            delay_ticks += 1;
        }
    }
    panic!("rotation made no progress");
}

#[test]
fn rotation_cycles_words_with_the_configured_delay() {
    init_tracing();
    // 2500ms at 60fps is a 150 frame delay between transitions.
    let mut rot = def("Design,Develop", 2500, 21).build().unwrap();
    rot.start();

    assert_eq!(drive_one_transition(&mut rot), 0);
    assert_eq!(rot.text(), "Design");

    assert_eq!(drive_one_transition(&mut rot), 150);
    assert_eq!(rot.text(), "Develop");

    // Third transition wraps back to the first word.
    assert_eq!(drive_one_transition(&mut rot), 150);
    assert_eq!(rot.text(), "Design");
}

#[test]
fn stop_mid_flight_lets_the_transition_render_its_target() {
    init_tracing();
    let mut rot = def("Design,Develop", 2500, 22).build().unwrap();
    rot.start();
    for _ in 0..3 {
        rot.tick();
    }
    rot.stop();

    let mut guard = 0;
    while !rot.is_idle() {
        rot.tick();
        guard += 1;
        assert!(guard < 1000, "stopped rotation should settle");
    }
    assert_eq!(rot.text(), "Design");
    assert_eq!(rot.transitions_completed(), 1);
    for _ in 0..10 {
        assert!(rot.tick().is_none(), "no further transition may begin");
    }
}

#[test]
fn scramble_glyphs_come_from_the_configured_alphabet() {
    init_tracing();
    let tuning = ScrambleTuning {
        glyphs: kinetype::GlyphSet::new("#?*").unwrap(),
        ..ScrambleTuning::default()
    };
    let mut scrambler = Scrambler::with_text("Old text", 23, tuning).unwrap();
    let completion = scrambler.set_text("New text!");

    while !completion.is_complete() {
        let frame = scrambler.tick().unwrap();
        for g in frame.glyphs() {
            if g.kind == GlyphKind::Scrambling {
                assert!("#?*".contains(g.ch));
            }
        }
    }
    assert_eq!(scrambler.text(), "New text!");
}

#[test]
fn interrupting_a_transition_chains_from_the_rendered_text() {
    init_tracing();
    let mut scrambler = Scrambler::with_text("Alpha", 24, ScrambleTuning::default()).unwrap();
    let first = scrambler.set_text("Beta");
    for _ in 0..10 {
        scrambler.tick();
    }
    let interrupted = scrambler.text().to_owned();

    let second = scrambler.set_text("Gamma");
    let session = scrambler.session().unwrap();
    let chained: String = session.tasks().iter().filter_map(|t| t.from).collect();
    assert_eq!(chained, interrupted);

    while !second.is_complete() {
        scrambler.tick();
    }
    assert_eq!(scrambler.text(), "Gamma");
    assert!(!first.is_complete(), "superseded completion must stay silent");
}

#[test]
fn clearing_text_resolves_every_position_to_nothing() {
    init_tracing();
    let mut scrambler = Scrambler::with_text("AB", 25, ScrambleTuning::default()).unwrap();
    let completion = scrambler.set_text("");
    assert_eq!(scrambler.session().unwrap().tasks().len(), 2);

    while !completion.is_complete() {
        scrambler.tick();
    }
    assert_eq!(scrambler.text(), "");
}

#[test]
fn equal_definitions_replay_identical_frame_sequences() {
    init_tracing();
    let build = || def("One,Two,Three", 100, 77).build().unwrap();
    let mut a = build();
    let mut b = build();
    a.start();
    b.start();

    for _ in 0..2000 {
        assert_eq!(
            a.tick().map(|f| f.plain()),
            b.tick().map(|f| f.plain())
        );
    }
}
