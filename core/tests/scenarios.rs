//! End to end runs of small programs through the public `Chip8` interface.

use emu8_core::state::FrameBuffer;
use emu8_core::{Chip8, Chip8Error, Config, PcOverflowPolicy, Renderer, Rom, Tone};

/// Keeps a copy of the last frame it was handed.
struct Screen {
    frames: usize,
    last: Option<FrameBuffer>,
}

impl Screen {
    fn new() -> Self {
        Screen {
            frames: 0,
            last: None,
        }
    }
}

impl Renderer for Screen {
    fn render(&mut self, frame: &FrameBuffer) {
        self.frames += 1;
        self.last = Some(*frame);
    }
}

struct Speaker {
    on: bool,
}

impl Tone for Speaker {
    fn set_tone(&mut self, on: bool) {
        self.on = on;
    }
}

fn boot(program: &[u8], config: Config) -> Chip8 {
    let mut chip8 = Chip8::with_seed(config, 0x0C8);
    chip8.load_rom(&Rom::from_bytes(program.to_vec()).unwrap());
    chip8
}

fn config(ipf: u32) -> Config {
    Config::new(ipf, 0x050, PcOverflowPolicy::Reset).unwrap()
}

fn run_cycles(chip8: &mut Chip8, cycles: usize) {
    for _ in 0..cycles {
        chip8.cycle().unwrap();
    }
}

#[test]
fn test_add_program() {
    // LD V0, 5; LD V1, 3; ADD V0, V1
    let mut chip8 = boot(&[0x60, 0x05, 0x61, 0x03, 0x80, 0x14], Config::default());
    run_cycles(&mut chip8, 3);
    assert_eq!(chip8.state().v[0x0], 8);
    assert_eq!(chip8.state().v[0xF], 0);
    assert_eq!(chip8.state().pc, 0x0206);
}

#[test]
fn test_call_then_return_is_balanced() {
    // 0x200: CALL 0x206; 0x202: LD V2, 1; 0x204: JP 0x204
    // 0x206: LD V1, 7; 0x208: RET
    let program = [0x22, 0x06, 0x62, 0x01, 0x12, 0x04, 0x61, 0x07, 0x00, 0xEE];
    let mut chip8 = boot(&program, Config::default());
    run_cycles(&mut chip8, 3);
    assert_eq!(chip8.state().pc, 0x0202);
    assert_eq!(chip8.state().sp, 0);
    run_cycles(&mut chip8, 1);
    assert_eq!(chip8.state().v[0x1], 7);
    assert_eq!(chip8.state().v[0x2], 1);
}

#[test]
fn test_runaway_recursion_overflows_stack() {
    // 0x200: CALL 0x200
    let mut chip8 = boot(&[0x22, 0x00], Config::default());
    run_cycles(&mut chip8, 16);
    assert_eq!(chip8.state().sp, 16);
    match chip8.cycle() {
        Err(Chip8Error::StackOverflow { pc }) => assert_eq!(pc, 0x0200),
        other => panic!("expected a stack overflow, got {:?}", other),
    }
}

#[test]
fn test_stack_overflow_ends_the_frame() {
    let mut chip8 = boot(&[0x22, 0x00], config(20));
    let mut screen = Screen::new();
    let mut speaker = Speaker { on: false };
    assert!(chip8.run_frame(&mut screen, &mut speaker).is_err());
    assert_eq!(screen.frames, 0);
}

#[test]
fn test_return_without_call_underflows() {
    let mut chip8 = boot(&[0x00, 0xEE], Config::default());
    assert!(matches!(
        chip8.cycle(),
        Err(Chip8Error::StackUnderflow { .. })
    ));
}

#[test]
fn test_wait_for_key_release() {
    // LD V5, K; LD V6, 1
    let mut chip8 = boot(&[0xF5, 0x0A, 0x66, 0x01], Config::default());
    run_cycles(&mut chip8, 5);
    assert!(chip8.is_waiting());
    assert_eq!(chip8.state().pc, 0x0200);
    assert_eq!(chip8.state().v[0x6], 0);

    chip8.key_down(0xB);
    run_cycles(&mut chip8, 5);
    assert!(chip8.is_waiting());
    assert!(chip8.state().keypad.is_pressed(0xB));

    chip8.key_up(0xB);
    assert!(!chip8.is_waiting());
    assert_eq!(chip8.state().v[0x5], 0xB);
    run_cycles(&mut chip8, 1);
    assert_eq!(chip8.state().v[0x6], 1);
    assert_eq!(chip8.state().pc, 0x0204);
}

#[test]
fn test_delay_timer_counts_down_per_frame() {
    // LD V0, 10; LD DT, V0; JP 0x204
    let mut chip8 = boot(&[0x60, 0x0A, 0xF0, 0x15, 0x12, 0x04], config(3));
    let mut screen = Screen::new();
    let mut speaker = Speaker { on: false };
    for frame in 1..=12u8 {
        chip8.run_frame(&mut screen, &mut speaker).unwrap();
        assert_eq!(chip8.state().delay_timer, 10u8.saturating_sub(frame));
    }
    assert_eq!(screen.frames, 12);
}

#[test]
fn test_timer_decrement_is_independent_of_ipf() {
    for &ipf in &[1, 7, 20] {
        // LD V0, 30; LD ST, V0; JP 0x204
        let mut chip8 = boot(&[0x60, 0x1E, 0xF0, 0x18, 0x12, 0x04], config(ipf));
        let mut screen = Screen::new();
        let mut speaker = Speaker { on: false };
        // The first frame at ipf 1 only gets as far as LD V0
        for _ in 0..5 {
            chip8.run_frame(&mut screen, &mut speaker).unwrap();
        }
        let expected = if ipf == 1 { 30 - 4 } else { 30 - 5 };
        assert_eq!(chip8.state().sound_timer, expected, "ipf {}", ipf);
        assert!(speaker.on);
    }
}

#[test]
fn test_sound_turns_off_when_timer_expires() {
    // LD V0, 1; LD ST, V0; JP 0x204
    let mut chip8 = boot(&[0x60, 0x01, 0xF0, 0x18, 0x12, 0x04], Config::default());
    let mut screen = Screen::new();
    let mut speaker = Speaker { on: true };
    chip8.run_frame(&mut screen, &mut speaker).unwrap();
    assert!(!speaker.on);
}

#[test]
fn test_draw_glyph_and_clear() {
    // LD V0, 0xF; LD F, V0; DRW V1, V1, 5; CLS; JP 0x208
    let program = [0x60, 0x0F, 0xF0, 0x29, 0xD1, 0x15, 0x00, 0xE0, 0x12, 0x08];
    let mut chip8 = boot(&program, Config::default());
    run_cycles(&mut chip8, 3);
    // F: 0xF0, 0x80, 0xF0, 0x80, 0x80
    assert_eq!(chip8.frame()[0][0..5], [1, 1, 1, 1, 0]);
    assert_eq!(chip8.frame()[1][0..5], [1, 0, 0, 0, 0]);
    assert_eq!(chip8.frame()[4][0..5], [1, 0, 0, 0, 0]);
    run_cycles(&mut chip8, 1);
    assert!(chip8.frame().iter().flatten().all(|&pixel| pixel == 0));
}

#[test]
fn test_renderer_sees_frame_after_budget() {
    // LD I, 0x050; DRW V0, V0, 1; JP 0x204
    let program = [0xA0, 0x50, 0xD0, 0x01, 0x12, 0x04];
    let mut chip8 = boot(&program, Config::default());
    let mut screen = Screen::new();
    let mut speaker = Speaker { on: false };
    chip8.run_frame(&mut screen, &mut speaker).unwrap();
    let frame = screen.last.unwrap();
    assert_eq!(frame[0][0..8], [1, 1, 1, 1, 0, 0, 0, 0]);
}

#[test]
fn test_custom_font_base() {
    // LD V0, 1; LD F, V0
    let config = Config::new(10, 0x100, PcOverflowPolicy::Reset).unwrap();
    let mut chip8 = boot(&[0x60, 0x01, 0xF0, 0x29], config);
    run_cycles(&mut chip8, 2);
    assert_eq!(chip8.state().i, 0x105);
    assert_eq!(chip8.state().memory[0x105..0x10A], [0x20, 0x60, 0x20, 0x20, 0x70]);
}

#[test]
fn test_bcd_then_read_back() {
    // LD V3, 157; LD I, 0x300; LD B, V3; LD V2, [I]
    let program = [0x63, 0x9D, 0xA3, 0x00, 0xF3, 0x33, 0xF2, 0x65];
    let mut chip8 = boot(&program, Config::default());
    run_cycles(&mut chip8, 4);
    assert_eq!(chip8.state().memory[0x300..0x303], [1, 5, 7]);
    assert_eq!(chip8.state().v[0x0..0x3], [1, 5, 7]);
}

#[test]
fn test_store_past_end_of_memory_is_fatal() {
    // LD I, 0xFFE; LD [I], V3
    let mut chip8 = boot(&[0xAF, 0xFE, 0xF3, 0x55], Config::default());
    run_cycles(&mut chip8, 1);
    assert!(matches!(
        chip8.cycle(),
        Err(Chip8Error::MemoryOutOfBounds { address: 0x0FFE, len: 4 })
    ));
}

#[test]
fn test_unknown_opcodes_are_skipped() {
    // 0x8128 and 0xE000 are undefined; LD V0, 1
    let mut chip8 = boot(&[0x81, 0x28, 0xE0, 0x00, 0x60, 0x01], Config::default());
    run_cycles(&mut chip8, 3);
    assert_eq!(chip8.state().v[0x0], 1);
    assert_eq!(chip8.state().pc, 0x0206);
}

#[test]
fn test_pc_past_memory_resets_to_rom_start() {
    // 0x200: LD V0, 1; 0x202: JP 0xFFF
    let mut chip8 = boot(&[0x60, 0x01, 0x1F, 0xFF], Config::default());
    run_cycles(&mut chip8, 2);
    assert_eq!(chip8.state().pc, 0x0FFF);
    run_cycles(&mut chip8, 1);
    assert_eq!(chip8.state().pc, 0x0202);
}

#[test]
fn test_pc_past_memory_is_fatal_when_strict() {
    let config = Config::new(10, 0x050, PcOverflowPolicy::Fault).unwrap();
    let mut chip8 = boot(&[0x1F, 0xFF], config);
    run_cycles(&mut chip8, 1);
    assert!(matches!(
        chip8.cycle(),
        Err(Chip8Error::PcOutOfBounds { pc: 0x0FFF })
    ));
}

#[test]
fn test_seeded_random_is_reproducible() {
    // RND V0, 0xFF; RND V1, 0xFF
    let program = [0xC0, 0xFF, 0xC1, 0xFF];
    let mut a = boot(&program, Config::default());
    let mut b = boot(&program, Config::default());
    run_cycles(&mut a, 2);
    run_cycles(&mut b, 2);
    assert_eq!(a.state().v[0x0..0x2], b.state().v[0x0..0x2]);
}

#[test]
fn test_register_skips_ignore_last_nibble() {
    // 0x200: SE V1, V2 (n = 1); 0x202: LD V3, 1; 0x204: SNE V0, V4 (n = F); 0x206: LD V3, 2
    let program = [0x51, 0x21, 0x63, 0x01, 0x90, 0x4F, 0x63, 0x02];
    let mut chip8 = boot(&program, Config::default());
    run_cycles(&mut chip8, 2);
    assert_eq!(chip8.state().pc, 0x0206);
    assert_eq!(chip8.state().v[0x3], 0);
}

#[test]
fn test_key_skip_selected_by_last_nibble() {
    // LD V1, 3; SKP V1 written as E10E; LD V2, 1; LD V2, 2
    let program = [0x61, 0x03, 0xE1, 0x0E, 0x62, 0x01, 0x62, 0x02];
    let mut chip8 = boot(&program, Config::default());
    chip8.key_down(0x3);
    run_cycles(&mut chip8, 3);
    assert_eq!(chip8.state().pc, 0x0208);
    assert_eq!(chip8.state().v[0x2], 2);
}
