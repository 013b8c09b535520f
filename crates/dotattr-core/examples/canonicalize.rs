use dotattr_core::{ElementKind, FormatConfig, format_attributes, lint_attributes};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Reads `name=value` lines (one attribute per line, `[graph]`, `[cluster]`,
/// `[node]` or `[edge]` headers switch the element kind), prints lint
/// findings and the canonical form of every block.
fn main() {
    let _ = env_logger::builder().try_init();
    let paths: Vec<PathBuf> = env::args().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        eprintln!("usage: canonicalize <file>...");
        return;
    }

    let mut clean = 0;
    let mut flagged = 0;

    for path in &paths {
        let input = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("SKIP {}: {}", path.display(), e);
                continue;
            }
        };

        for (element, attrs) in blocks(&input) {
            let findings = lint_attributes(element, &attrs);
            if findings.is_empty() {
                clean += 1;
            } else {
                flagged += 1;
                for finding in &findings {
                    eprintln!(
                        "{}: {:?} {}: {}",
                        path.display(),
                        element,
                        finding.attribute,
                        finding.diagnostic
                    );
                }
            }

            println!("[{}]", element_name(element));
            for (name, value) in format_attributes(element, &attrs, &FormatConfig::default()) {
                println!("{name}={value}");
            }
        }
    }

    println!("\nClean: {}, Flagged: {}", clean, flagged);
}

fn element_name(element: ElementKind) -> &'static str {
    match element {
        ElementKind::Graph => "graph",
        ElementKind::Cluster => "cluster",
        ElementKind::Node => "node",
        ElementKind::Edge => "edge",
    }
}

fn blocks(input: &str) -> Vec<(ElementKind, Vec<(&str, &str)>)> {
    let mut blocks: Vec<(ElementKind, Vec<(&str, &str)>)> = Vec::new();
    for line in input.lines().map(str::trim).filter(|l| !l.is_empty() && !l.starts_with('#')) {
        let header = match line {
            "[graph]" => Some(ElementKind::Graph),
            "[cluster]" => Some(ElementKind::Cluster),
            "[node]" => Some(ElementKind::Node),
            "[edge]" => Some(ElementKind::Edge),
            _ => None,
        };
        if let Some(element) = header {
            blocks.push((element, Vec::new()));
            continue;
        }
        let Some((name, value)) = line.split_once('=') else {
            eprintln!("ignoring line without '=': {line}");
            continue;
        };
        if blocks.is_empty() {
            blocks.push((ElementKind::Graph, Vec::new()));
        }
        if let Some((_, attrs)) = blocks.last_mut() {
            attrs.push((name.trim(), value.trim()));
        }
    }
    blocks
}
