//! Scripted engine walkthrough: registers a handful of rules, replays a
//! short synthetic frame sequence, prints every dispatch.

use gesture_rules::{
    EngineEvent, FeatureArg, GestureEngine, HalfRule, Rule, RuleOptions, Test,
};
use glam::Vec3;
use hand_frame::{FingerType, Frame, FrameBuffer, FrameBuilder, Hand, HandBuilder, HandSide};

fn is_true(v: &gesture_rules::FeatureValue) -> bool {
    v.as_bool() == Some(true)
}

fn open_hand(side: HandSide) -> Hand {
    HandBuilder::new(side).build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║          gesture_rules — scripted dispatch demo          ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let mut engine = GestureEngine::new();

    // ── rule registration ────────────────────────────────────────────────
    engine.add_rule_with(
        Rule::one_hand(HalfRule::single(Test::new("fist", is_true))),
        |hands| println!("   ▶ grab        ({} hand)", hands[0].side.name()),
        RuleOptions::named("grab"),
    )?;

    engine.add_rule_with(
        Rule::one_hand(HalfRule::new(vec![
            Test::new("peace", is_true),
            Test::with_args(
                "two_fingers_spread",
                vec![
                    FeatureArg::Finger(FingerType::Index),
                    FeatureArg::Finger(FingerType::Middle),
                ],
                is_true,
            ),
        ])),
        |hands| println!("   ▶ scissors    ({} hand)", hands[0].side.name()),
        RuleOptions::named("scissors"),
    )?;

    engine.add_rule_with(
        Rule::two_hands(
            HalfRule::single(Test::new("open_palm", is_true)),
            HalfRule::single(Test::new("open_palm", is_true)),
        ),
        |hands| {
            println!(
                "   ▶ clap-ready  ({} + {})",
                hands[0].side.name(),
                hands[1].side.name()
            )
        },
        RuleOptions::named("clap-ready"),
    )?;

    engine.add_rule_with(
        Rule::one_hand(HalfRule::single(Test::new("rotation_angle", |v| {
            v.as_number().map(|a| a >= 1.0).unwrap_or(false)
        }))),
        |hands| println!("   ▶ twist       ({} hand)", hands[0].side.name()),
        RuleOptions::named("twist").blocking(false),
    )?;

    // Deliberately malformed: rejected, engine unchanged.
    let rejected = engine.add_rule(
        Rule::one_hand(HalfRule::single(Test::new("levitate", is_true))),
        |_| {},
    );
    println!("registered rules : {:?}", engine.rule_names());
    println!("bogus rule       : {}", rejected.unwrap_err());
    println!();

    engine.on(EngineEvent::Nothing, || println!("   ·  (nothing)"));

    // ── scripted frame sequence ──────────────────────────────────────────
    let rolled = HandBuilder::new(HandSide::Right)
        .palm_normal(Vec3::NEG_X) // quarter turn vs. the flat default
        .build();

    let script: Vec<(&str, Frame)> = vec![
        ("empty room", FrameBuilder::new(1).build()),
        ("sensor hiccup", Frame::invalid(2)),
        (
            "right fist",
            FrameBuilder::new(3)
                .hand(HandBuilder::new(HandSide::Right).fist().build())
                .build(),
        ),
        (
            "left peace sign",
            FrameBuilder::new(4)
                .hand(
                    HandBuilder::new(HandSide::Left)
                        .extended_only(&[FingerType::Index, FingerType::Middle])
                        .build(),
                )
                .build(),
        ),
        (
            "open left + right fist (ambidextrous grab)",
            FrameBuilder::new(5)
                .hand(open_hand(HandSide::Left))
                .hand(HandBuilder::new(HandSide::Right).fist().build())
                .build(),
        ),
        (
            "both palms open",
            FrameBuilder::new(6)
                .hand(open_hand(HandSide::Right))
                .hand(open_hand(HandSide::Left))
                .build(),
        ),
        (
            "right hand rolled a quarter turn",
            FrameBuilder::new(7).hand(rolled).build(),
        ),
    ];

    let mut history = FrameBuffer::new(16);
    // Seed so frame 1's look-back features have something to compare to.
    history.push(
        FrameBuilder::new(0).hand(open_hand(HandSide::Right)).build(),
    );

    for (label, frame) in script {
        println!("frame {:>2}  {}", frame.id, label);
        let summary = engine.process_frame(&frame, &history)?;
        if summary.matched.is_empty() {
            println!("   matched: none");
        } else {
            println!("   matched: {}", summary.matched.join(", "));
        }
        history.push(frame);
        println!();
    }

    Ok(())
}
