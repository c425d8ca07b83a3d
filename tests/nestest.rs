// Nestest CPU trace comparison
//
// The golden run executes nestest.nes in automation mode (PC=$C000) through
// the full Bus and compares every trace line against nestest.log: the
// columns up to SP exactly, and CYC as a delta from the first line.
//
// Run with: cargo test --test nestest -- --ignored --nocapture
// ROM and log default to tests/nes-test-rom/other/ and can be overridden
// with NESTEST_ROM and NESTEST_LOG.

mod common;

use common::{Program, RomImage};
use nes_core::bus::Bus;
use nes_core::cartridge::Cartridge;
use std::fs;
use std::path::PathBuf;

const NESTEST_INSTRUCTIONS: usize = 5003;

/// Column where the register dump starts
const REGISTER_COLUMN: usize = 48;

fn fixture(var: &str, default: &str) -> PathBuf {
    common::rom_from_env(var).unwrap_or_else(|| PathBuf::from(default))
}

/// Trace text up to and including the SP field
fn registers_prefix(line: &str) -> Option<&str> {
    line.find("SP:").map(|pos| &line[..(pos + 5).min(line.len())])
}

fn cycle_count(line: &str) -> Option<u64> {
    line.rsplit("CYC:").next()?.trim().parse().ok()
}

#[test]
#[ignore] // Needs nestest.nes and nestest.log
fn nestest_cpu_test() {
    common::init_logger();

    let rom_path = fixture("NESTEST_ROM", "tests/nes-test-rom/other/nestest.nes");
    let log_path = fixture("NESTEST_LOG", "tests/nes-test-rom/other/nestest.log");
    let golden_log = fs::read_to_string(&log_path).expect("failed to load nestest.log");
    let golden_lines: Vec<&str> = golden_log.lines().collect();

    let mut bus = Bus::new();
    bus.insert_cartridge(Cartridge::from_file(&rom_path).expect("failed to load nestest.nes"));
    bus.reset();
    common::advance_to_fetch(&mut bus);

    // Automation mode skips the reset vector
    bus.cpu_mut().pc = 0xC000;
    bus.cpu_mut().status = 0x24;

    let golden_start = cycle_count(golden_lines[0]).expect("golden log has no CYC column");
    let start = bus.cpu().total_cycles();

    let mut mismatches = Vec::new();
    for (index, golden) in golden_lines.iter().take(NESTEST_INSTRUCTIONS).enumerate() {
        let line = bus.trace();

        let registers_match = registers_prefix(&line) == registers_prefix(golden);
        let cycles = bus.cpu().total_cycles() - start;
        let cycles_match = cycle_count(golden).map(|cyc| cyc - golden_start) == Some(cycles);

        if !(registers_match && cycles_match) {
            if mismatches.is_empty() {
                println!("First mismatch at instruction {}:", index + 1);
                println!("Expected: {}", golden);
                println!("Got:      {} (CYC delta {})", line, cycles);
            }
            mismatches.push(index + 1);
        }

        common::step_instruction(&mut bus);
    }

    let ram = bus.ram();
    println!("Result codes: $02={:02X} $03={:02X}", ram[0x02], ram[0x03]);
    println!("Trace mismatches: {}", mismatches.len());

    assert_eq!(ram[0x02], 0, "official opcode tests reported an error");
    assert_eq!(ram[0x03], 0, "unofficial opcode tests reported an error");
    assert!(
        mismatches.is_empty(),
        "{} trace mismatches, first at line {}",
        mismatches.len(),
        mismatches[0]
    );
}

// ========================================
// Trace format
// ========================================

#[test]
fn test_trace_line_after_reset() {
    let image = RomImage::new().program(&Program::new().lda(0x42).ldx(0x07));
    let mut bus = common::bus_with(&image);
    common::advance_to_fetch(&mut bus);

    let line = bus.trace();
    assert!(line.starts_with("8000  A9 42     LDA #$42"), "{line}");
    assert_eq!(line.find("A:"), Some(REGISTER_COLUMN), "{line}");
    assert!(line.ends_with("A:00 X:00 Y:00 P:20 SP:FD CYC:8"), "{line}");
}

#[test]
fn test_trace_follows_execution() {
    let image = RomImage::new().program(&Program::new().lda(0x42).ldx(0x07).sta(0x0010));
    let mut bus = common::bus_with(&image);
    common::advance_to_fetch(&mut bus);

    common::step_instruction(&mut bus);
    let line = bus.trace();
    assert!(line.starts_with("8002  A2 07     LDX #$07"), "{line}");
    assert!(line.contains("A:42 X:00"), "{line}");
    assert!(line.ends_with("CYC:10"), "{line}");

    common::step_instruction(&mut bus);
    let line = bus.trace();
    assert!(line.starts_with("8004  8D 10 00  STA $0010 = 00"), "{line}");
    assert!(line.ends_with("CYC:12"), "{line}");
}

#[test]
fn test_trace_has_no_side_effects() {
    // LDA $2002 would clear vblank if the trace read it
    let image = RomImage::new().program(&Program::new().lda_abs(0x2002));
    let mut bus = common::bus_with(&image);
    common::advance_to_fetch(&mut bus);

    let before = bus.ppu().status();
    let first = bus.trace();
    let second = bus.trace();

    assert_eq!(first, second);
    assert_eq!(bus.ppu().status(), before);
    assert!(first.contains("LDA $2002 = "), "{first}");
}

#[test]
fn test_compare_helpers() {
    let golden = "C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD PPU:  0, 21 CYC:7";
    assert_eq!(
        registers_prefix(golden),
        Some("C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD")
    );
    assert_eq!(cycle_count(golden), Some(7));
    assert_eq!(golden.find("A:"), Some(REGISTER_COLUMN));
}
