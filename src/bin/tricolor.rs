//! Minimal CLI for generating colored graphs, signing and verifying messages.
//!
//! The secret instance (graph plus coloring) and the public graph are written
//! as separate JSON files; only the latter and the proof should be shared with
//! a verifier.  Set `TRICOLOR_PARAMS` to a JSON file to override the scheme
//! parameters and `RUST_LOG` to adjust log verbosity.

use rand::rngs::OsRng;
use rand::RngCore;
use std::env;
use std::path::PathBuf;
use tricolor::io::{read_json, write_json, DEFAULT_OUTPUT_DIR};
use tricolor::{ColoredGraph, Graph, Proof, SchemeParams, SeededRng, Signer, Verifier};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_VERTICES: usize = 35;
const DEFAULT_ATTEMPTS: usize = 16;
const DEMO_MESSAGE: &str = "Kogo lisek przyodzieje";
const DEMO_PROBES: [&str; 4] = [
    "Kogo lisek przyodzieja",
    "Kogo Lisek przyodzieje",
    "inna dlugosc14",
    "Inny tekst tej dlugosc",
];

fn fatal(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn print_help() {
    println!("Usage: tricolor <generate|sign|verify|demo> ...");
    println!("  generate [--vertices N] [--out <instance.json>] [--graph-out <graph.json>]");
    println!("           [--attempts K] [--seed S]");
    println!("  sign --instance <instance.json> --message <text> --out <proof.json> [--seed S]");
    println!("  verify --graph <graph.json> --proof <proof.json> --message <text>");
    println!("  demo [--vertices N] [--seed S]");
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn main() {
    init_tracing();
    let mut args = env::args().skip(1);
    let command = args.next();
    let tail: Vec<String> = args.collect();
    match command.as_deref() {
        Some("generate") => cmd_generate(tail),
        Some("sign") => cmd_sign(tail),
        Some("verify") => cmd_verify(tail),
        Some("demo") => cmd_demo(tail),
        Some("-h") | Some("--help") => print_help(),
        _ => {
            print_help();
            std::process::exit(1);
        }
    }
}

fn load_params() -> SchemeParams {
    match env::var("TRICOLOR_PARAMS") {
        Ok(path) => SchemeParams::from_json_file(&path)
            .unwrap_or_else(|err| fatal(&format!("failed to load parameters: {err}"))),
        Err(_) => SchemeParams::default(),
    }
}

/// Seeded runs are reproducible; otherwise the seed comes from the OS.
fn make_rng(seed: Option<u64>) -> SeededRng {
    match seed {
        Some(seed) => SeededRng::new(seed),
        None => {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            SeededRng::from_seed_bytes(bytes)
        }
    }
}

fn next_value(iter: &mut impl Iterator<Item = String>, flag: &str) -> String {
    iter.next()
        .unwrap_or_else(|| fatal(&format!("{flag} expects a value")))
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> T {
    value
        .parse()
        .unwrap_or_else(|_| fatal(&format!("invalid {flag} value")))
}

fn cmd_generate(args: Vec<String>) {
    let mut vertices = DEFAULT_VERTICES;
    let mut attempts = DEFAULT_ATTEMPTS;
    let mut seed: Option<u64> = None;
    let mut out: Option<PathBuf> = None;
    let mut graph_out: Option<PathBuf> = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--vertices" | "-n" => {
                vertices = parse_number(&next_value(&mut iter, "--vertices"), "--vertices")
            }
            "--attempts" => {
                attempts = parse_number(&next_value(&mut iter, "--attempts"), "--attempts")
            }
            "--seed" => seed = Some(parse_number(&next_value(&mut iter, "--seed"), "--seed")),
            "--out" => out = Some(PathBuf::from(next_value(&mut iter, "--out"))),
            "--graph-out" => graph_out = Some(PathBuf::from(next_value(&mut iter, "--graph-out"))),
            other => fatal(&format!("unknown argument: {other}")),
        }
    }
    let params = load_params();
    let out = out.unwrap_or_else(|| {
        PathBuf::from(DEFAULT_OUTPUT_DIR).join(format!("instance_{vertices}.json"))
    });
    let graph_out = graph_out
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR).join(format!("graph_{vertices}.json")));

    let mut rng = make_rng(seed);
    let instance =
        ColoredGraph::generate_with_min_edges(&mut rng, vertices, params.min_edges, attempts)
            .unwrap_or_else(|err| fatal(&format!("graph generation failed: {err}")));
    write_json(&out, &instance)
        .unwrap_or_else(|err| fatal(&format!("failed to write instance: {err}")));
    write_json(&graph_out, instance.graph())
        .unwrap_or_else(|err| fatal(&format!("failed to write graph: {err}")));
    info!(
        vertices,
        edges = instance.graph().edge_count(),
        "generated colored graph"
    );
    println!("instance_path: {}", out.display());
    println!("graph_path: {}", graph_out.display());
}

fn cmd_sign(args: Vec<String>) {
    let mut instance_path: Option<PathBuf> = None;
    let mut message: Option<String> = None;
    let mut out: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--instance" => instance_path = Some(PathBuf::from(next_value(&mut iter, "--instance"))),
            "--message" | "-m" => message = Some(next_value(&mut iter, "--message")),
            "--out" => out = Some(PathBuf::from(next_value(&mut iter, "--out"))),
            "--seed" => seed = Some(parse_number(&next_value(&mut iter, "--seed"), "--seed")),
            other => fatal(&format!("unknown argument: {other}")),
        }
    }
    let instance_path = instance_path.unwrap_or_else(|| fatal("--instance is required"));
    let message = message.unwrap_or_else(|| fatal("--message is required"));
    let out = out.unwrap_or_else(|| fatal("--out is required"));

    let instance: ColoredGraph = read_json(&instance_path)
        .unwrap_or_else(|err| fatal(&format!("failed to load instance: {err}")));
    let signer = Signer::new(&instance, load_params());
    let proof = signer
        .sign_with_rng(&mut make_rng(seed), &message)
        .unwrap_or_else(|err| fatal(&format!("signing failed: {err}")));
    write_json(&out, &proof).unwrap_or_else(|err| fatal(&format!("failed to write proof: {err}")));
    info!(rounds = proof.signature.len(), "message signed");
    println!("proof_path: {}", out.display());
}

fn cmd_verify(args: Vec<String>) {
    let mut graph_path: Option<PathBuf> = None;
    let mut proof_path: Option<PathBuf> = None;
    let mut message: Option<String> = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--graph" => graph_path = Some(PathBuf::from(next_value(&mut iter, "--graph"))),
            "--proof" => proof_path = Some(PathBuf::from(next_value(&mut iter, "--proof"))),
            "--message" | "-m" => message = Some(next_value(&mut iter, "--message")),
            other => fatal(&format!("unknown argument: {other}")),
        }
    }
    let graph_path = graph_path.unwrap_or_else(|| fatal("--graph is required"));
    let proof_path = proof_path.unwrap_or_else(|| fatal("--proof is required"));
    let message = message.unwrap_or_else(|| fatal("--message is required"));

    let graph: Graph = read_json(&graph_path)
        .unwrap_or_else(|err| fatal(&format!("failed to load graph: {err}")));
    let proof: Proof = read_json(&proof_path)
        .unwrap_or_else(|err| fatal(&format!("failed to load proof: {err}")));
    match Verifier::new(&graph, load_params()).check(&message, &proof) {
        Ok(()) => println!("signature valid"),
        Err(reason) => fatal(&format!("signature rejected: {reason}")),
    }
}

fn cmd_demo(args: Vec<String>) {
    let mut vertices = DEFAULT_VERTICES;
    let mut seed: Option<u64> = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--vertices" | "-n" => {
                vertices = parse_number(&next_value(&mut iter, "--vertices"), "--vertices")
            }
            "--seed" => seed = Some(parse_number(&next_value(&mut iter, "--seed"), "--seed")),
            other => fatal(&format!("unknown argument: {other}")),
        }
    }
    let params = load_params();
    let mut rng = make_rng(seed);
    let instance = ColoredGraph::generate_with_min_edges(
        &mut rng,
        vertices,
        params.min_edges,
        DEFAULT_ATTEMPTS,
    )
    .unwrap_or_else(|err| fatal(&format!("graph generation failed: {err}")));
    println!(
        "graph: {} vertices, {} edges",
        instance.graph().vertex_count(),
        instance.graph().edge_count()
    );

    let proof = Signer::new(&instance, params.clone())
        .sign_with_rng(&mut rng, DEMO_MESSAGE)
        .unwrap_or_else(|err| fatal(&format!("signing failed: {err}")));
    let verifier = Verifier::new(instance.graph(), params);
    println!("{:<28} | verified", "message");
    println!("{}", "-".repeat(40));
    for message in std::iter::once(DEMO_MESSAGE).chain(DEMO_PROBES) {
        println!("{:<28} | {}", message, verifier.verify(message, &proof));
    }
}
