use std::process;

use log::info;
use vm_paging::{
    EngineConfig, TranslationEngine, TranslationLevel, TranslationOutcome, DEFAULT_TLB_CAPACITY,
};

/// 参考演示序列（与参考程序一致）
const DEMO_ADDRESSES: &[u64] = &[0, 4096, 8192, 12288, 4096, 16384, 16384];
/// 参考演示使用的 TLB 容量
const DEMO_TLB_CAPACITY: usize = 2;

#[derive(Default)]
struct CliArgs {
    tlb_capacity: Option<usize>,
    json: bool,
    addresses: Vec<u64>,
}

fn parse_args(mut iter: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--tlb-capacity" | "-t" => {
                let Some(value) = iter.next() else {
                    return Err(format!("Missing value for {arg}"));
                };
                match value.parse::<usize>() {
                    Ok(capacity) => args.tlb_capacity = Some(capacity),
                    Err(_) => return Err(format!("Invalid TLB capacity: {value}")),
                }
            }
            "--json" => {
                args.json = true;
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            _ => match arg.parse::<u64>() {
                Ok(address) => args.addresses.push(address),
                Err(_) => return Err(format!("Unknown argument: {arg}")),
            },
        }
    }

    Ok(args)
}

fn print_usage() {
    println!("Paged-memory translation simulator");
    println!();
    println!("USAGE:");
    println!("    paging-cli [OPTIONS] [ADDR...]");
    println!();
    println!("ARGS:");
    println!("    [ADDR...]                Virtual addresses to translate");
    println!("                             [default: the reference demo sequence]");
    println!();
    println!("OPTIONS:");
    println!("    -t, --tlb-capacity <N>   TLB capacity [default: 2 for the demo");
    println!("                             sequence, {DEFAULT_TLB_CAPACITY} otherwise]");
    println!("    --json                   Emit outcomes and metrics as JSON");
    println!("    -h, --help               Print this help message");
}

fn outcome_line(outcome: &TranslationOutcome) -> String {
    let classification = match outcome.level {
        TranslationLevel::TlbHit => "TLB hit".to_string(),
        TranslationLevel::PageTableHit => "TLB miss, Page Table hit".to_string(),
        TranslationLevel::PageFault => "TLB miss, Page Table miss (page fault)".to_string(),
    };
    let eviction = match outcome.evicted_page {
        Some(page) => format!(", evicted page {page} from TLB"),
        None => String::new(),
    };
    format!(
        "Virtual Address: {}, {}. Physical Address: {}{}",
        outcome.virtual_address, classification, outcome.physical_address, eviction
    )
}

fn print_tables(engine: &TranslationEngine) {
    println!("Page Table:");
    println!("Page Number | Frame Number");
    for (page, frame) in engine.page_table().sorted_entries() {
        println!("{page:>11} | {frame:>12}");
    }
    println!();
    println!("TLB Table:");
    println!("Page Number | Frame Number");
    for entry in engine.tlb().sorted_entries() {
        println!("{:>11} | {:>12}", entry.page, entry.frame);
    }
    println!();
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            process::exit(1);
        }
    };

    let (addresses, default_capacity) = if args.addresses.is_empty() {
        (DEMO_ADDRESSES.to_vec(), DEMO_TLB_CAPACITY)
    } else {
        (args.addresses.clone(), DEFAULT_TLB_CAPACITY)
    };
    let tlb_capacity = args.tlb_capacity.unwrap_or(default_capacity);

    let mut engine = match TranslationEngine::new(EngineConfig { tlb_capacity }) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };

    info!(
        "translating {} addresses, TLB capacity {}",
        addresses.len(),
        tlb_capacity
    );

    let mut outcomes = Vec::with_capacity(addresses.len());
    for &address in &addresses {
        let outcome = engine.translate(address);
        if !args.json {
            println!("{}", outcome_line(&outcome));
            print_tables(&engine);
        }
        outcomes.push(outcome);
    }

    let report = engine.report();
    if args.json {
        let value = serde_json::json!({
            "outcomes": outcomes,
            "metrics": report,
        });
        match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("error: failed to serialize report: {err}");
                process::exit(1);
            }
        }
    } else {
        print!("{report}");
    }
}
