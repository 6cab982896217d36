use std::{
    env,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    process,
};

#[path = "../../../src/button/config.rs"]
mod config;
#[path = "../../../src/button/core.rs"]
mod core;
#[path = "../../../src/button/sched.rs"]
mod sched;
#[path = "../../../src/button/types.rs"]
mod types;

use crate::core::PressEngine;
use types::{Intent, IntentEvent, KeyEdge, KeyEvent};

#[derive(Clone, Copy)]
struct ReplayEdge {
    ms: u64,
    edge: KeyEdge,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let mut trace_path: Option<PathBuf> = None;
    let mut expect_path: Option<PathBuf> = None;

    let mut idx = 1usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--expect" => {
                idx += 1;
                let Some(path) = args.get(idx) else {
                    return Err("missing path after --expect".into());
                };
                expect_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("{}", usage());
                return Ok(());
            }
            value if value.starts_with('-') => {
                return Err(format!("unknown argument: {value}"));
            }
            value => {
                if trace_path.is_some() {
                    return Err("multiple trace paths provided".into());
                }
                trace_path = Some(PathBuf::from(value));
            }
        }
        idx += 1;
    }

    let trace_path = trace_path.ok_or_else(usage)?;
    let edges = parse_trace(&trace_path)?;

    let mut engine = PressEngine::default();
    let mut events: Vec<IntentEvent> = Vec::new();
    for replay in &edges {
        collect(
            &mut events,
            engine.handle_key(KeyEvent {
                edge: replay.edge,
                t_ms: replay.ms,
            }),
        );
    }

    // Captured traces stop at the last physical edge; pending confirmation
    // windows still have to run out before the tally is final.
    while let Some(deadline_ms) = engine.next_deadline() {
        collect(&mut events, engine.advance(deadline_ms));
    }

    println!("intent,ms,kind");
    for event in &events {
        println!("intent,{},{}", event.at_ms, event.intent.label());
    }

    if let Some(expect_path) = expect_path {
        let expected = parse_expected_kinds(&expect_path)?;
        let actual: Vec<&'static str> = events.iter().map(|e| e.intent.label()).collect();
        if actual != expected {
            eprintln!("expected kinds: {}", expected.join(","));
            eprintln!("actual kinds:   {}", actual.join(","));
            return Err("intent sequence mismatch".into());
        }
    }

    Ok(())
}

fn collect(events: &mut Vec<IntentEvent>, output: core::EngineOutput) {
    for event in output.intents.iter() {
        events.push(*event);
    }
}

fn usage() -> String {
    "usage: press_replay <trace.csv> [--expect expected_kinds.txt]".to_string()
}

fn parse_trace(path: &Path) -> Result<Vec<ReplayEdge>, String> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out: Vec<ReplayEdge> = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result
            .map_err(|e| format!("failed to read {}:{}: {e}", path.display(), line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if trimmed == "key_trace,ms,edge" {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').collect();
        if parts.len() < 3 {
            return Err(format!(
                "{}:{} invalid trace line, expected 3 columns",
                path.display(),
                line_no
            ));
        }
        if parts[0].trim() != "key_trace" {
            continue;
        }

        let ms = parse_u64(parts[1], path, line_no, "ms")?;
        let edge = parse_edge(parts[2], path, line_no)?;

        if let Some(previous) = out.last() {
            if ms < previous.ms {
                return Err(format!(
                    "{}:{} trace time went backwards: {} after {}",
                    path.display(),
                    line_no,
                    ms,
                    previous.ms
                ));
            }
        }

        out.push(ReplayEdge { ms, edge });
    }

    Ok(out)
}

fn parse_expected_kinds(path: &Path) -> Result<Vec<&'static str>, String> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    let reader = BufReader::new(file);

    let mut kinds = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result
            .map_err(|e| format!("failed to read {}:{}: {e}", path.display(), line_no))?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }

        let normalized = normalize_kind(token).ok_or_else(|| {
            format!(
                "{}:{} invalid expected intent kind: {}",
                path.display(),
                line_no,
                token
            )
        })?;
        kinds.push(normalized);
    }

    Ok(kinds)
}

fn normalize_kind(kind: &str) -> Option<&'static str> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "short_press" => Some(Intent::ShortPress.label()),
        "long_press" => Some(Intent::LongPress.label()),
        "double_tap" => Some(Intent::DoubleTap.label()),
        _ => None,
    }
}

fn parse_edge(raw: &str, path: &Path, line_no: usize) -> Result<KeyEdge, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "down" => Ok(KeyEdge::Down),
        "up" => Ok(KeyEdge::Up),
        other => Err(format!(
            "{}:{} invalid edge '{}', expected down or up",
            path.display(),
            line_no,
            other
        )),
    }
}

fn parse_u64(raw: &str, path: &Path, line_no: usize, field: &str) -> Result<u64, String> {
    raw.trim().parse::<u64>().map_err(|e| {
        format!(
            "{}:{} invalid {} '{}': {}",
            path.display(),
            line_no,
            field,
            raw.trim(),
            e
        )
    })
}
