//! Synthetic-frame walkthrough: builds hands, prints derived measurements.

use glam::Vec3;
use hand_frame::{
    FingerType, FrameBuffer, FrameBuilder, FrameHistory, HandBuilder, HandSide,
};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║            hand_frame — synthetic frame demo             ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    // ── 1. A flat open right hand ────────────────────────────────────────
    let open = HandBuilder::new(HandSide::Right).build();
    println!("1. Open right hand");
    println!("   yaw {:+.3}  pitch {:+.3}  roll {:+.3}  (rad)",
             open.yaw(), open.pitch(), open.roll());
    for kind in FingerType::all() {
        let f = open.finger(kind);
        println!("   {:<6} extended={:<5} tip=({:+6.1}, {:+6.1}, {:+6.1})",
                 kind.name(), f.extended,
                 f.tip_position.x, f.tip_position.y, f.tip_position.z);
    }
    println!();

    // ── 2. Peace sign on the left hand ───────────────────────────────────
    let peace = HandBuilder::new(HandSide::Left)
        .extended_only(&[FingerType::Index, FingerType::Middle])
        .build();
    let code: u8 = peace
        .fingers
        .iter()
        .filter(|f| f.extended)
        .map(|f| f.kind.code())
        .sum();
    println!("2. Peace sign ({} hand)", peace.side.name());
    println!("   extended-finger bit-code: {}  (index=2 | middle=4)", code);
    println!();

    // ── 3. Frames and valid-hand counting ────────────────────────────────
    let two = FrameBuilder::new(1)
        .hand(open.clone())
        .hand(peace.clone())
        .build();
    let one = FrameBuilder::new(2)
        .hand(HandBuilder::new(HandSide::Left).valid(false).build())
        .hand(open.clone())
        .build();
    println!("3. Valid-hand counting");
    println!("   two valid hands reported  → count {}", two.valid_hand_count());
    println!("   one of two hands invalid  → count {}", one.valid_hand_count());
    println!();

    // ── 4. Motion across a frame buffer ──────────────────────────────────
    let mut history = FrameBuffer::new(8);
    let before = HandBuilder::new(HandSide::Right)
        .palm_position(Vec3::new(0.0, 180.0, 0.0))
        .build();
    history.push(FrameBuilder::new(10).hand(before).build());

    let after = HandBuilder::new(HandSide::Right)
        .palm_position(Vec3::new(12.0, 180.0, -30.0))
        .palm_normal(Vec3::NEG_X) // rolled a quarter turn
        .build();

    if let Some(past) = history.frame(0).and_then(|f| f.hand(HandSide::Right)) {
        let t = after.translation(past);
        println!("4. Motion since the previous frame");
        println!("   translation  ({:+.1}, {:+.1}, {:+.1}) mm", t.x, t.y, t.z);
        println!("   rotation     {:.3} rad about ({:+.2}, {:+.2}, {:+.2})",
                 after.rotation_angle(past),
                 after.rotation_axis(past).x,
                 after.rotation_axis(past).y,
                 after.rotation_axis(past).z);
    }
    println!();
}
