//! Outline command - print the document tree as an indented listing.

use std::path::PathBuf;

use kmlfit::document::{load_document, Node};
use kmlfit::walk::{walk, Step, WalkOptions};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the outline command.
pub struct OutlineArgs {
    pub file: PathBuf,
    pub geometries: bool,
    pub no_features: bool,
    pub max_depth: Option<usize>,
}

/// Run the outline command.
pub fn run(args: OutlineArgs, verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(verbose)?;
    runner.log_startup("outline");

    let root = load_document(&args.file)?;
    for line in outline(&root, &args) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per visited node, indented two spaces per level.
pub fn outline(root: &Node, args: &OutlineArgs) -> Vec<String> {
    let mut lines = Vec::new();
    let options = WalkOptions::with_root_context(0usize)
        .with_features(!args.no_features)
        .with_geometries(args.geometries);

    walk(
        root,
        |node, depth| {
            lines.push(describe(node, *depth));
            match args.max_depth {
                Some(max) if *depth >= max => Step::SkipChildren,
                _ => Step::Continue(depth + 1),
            }
        },
        options,
    );
    lines
}

fn describe(node: &Node, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    let mut line = format!("{}{}", indent, node.kind());
    if let Some(name) = node.name() {
        line.push_str(&format!(" \"{}\"", name));
    }
    let points = node.extract().len();
    if points > 0 {
        line.push_str(&format!(" ({} pts)", points));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmlfit::document::{Group, Placemark};

    fn args(geometries: bool, max_depth: Option<usize>) -> OutlineArgs {
        OutlineArgs {
            file: PathBuf::from("unused.json"),
            geometries,
            no_features: false,
            max_depth,
        }
    }

    fn sample() -> Node {
        Node::Group(Group {
            name: Some("Trip".to_string()),
            view: None,
            children: vec![
                Node::Placemark(Placemark {
                    name: Some("Start".to_string()),
                    view: None,
                    geometry: Some(Box::new(Node::point(1.0, 2.0, 0.0))),
                }),
                Node::group(vec![Node::placemark(Node::point(3.0, 4.0, 0.0))]),
            ],
        })
    }

    #[test]
    fn test_outline_features() {
        assert_eq!(
            outline(&sample(), &args(false, None)),
            vec![
                "group \"Trip\" (2 pts)",
                "  placemark \"Start\" (1 pts)",
                "  group (1 pts)",
                "    placemark (1 pts)",
            ]
        );
    }

    #[test]
    fn test_outline_with_geometries() {
        let lines = outline(&sample(), &args(true, None));
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[2], "    point (1 pts)");
    }

    #[test]
    fn test_outline_max_depth() {
        let lines = outline(&sample(), &args(false, Some(1)));
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| !l.starts_with("    ")));
    }

    #[test]
    fn test_outline_no_features() {
        let mut a = args(false, None);
        a.no_features = true;
        assert_eq!(outline(&sample(), &a), vec!["group \"Trip\" (2 pts)"]);
    }
}
