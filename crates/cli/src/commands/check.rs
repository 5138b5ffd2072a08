use std::path::Path;
use std::process;

use bugs_core::{Rule, Tree};

use crate::{read_source, report_error, report_parse_error, OutputFormat};

pub(crate) fn cmd_check(file: &Path, rule: Option<Rule>, output: OutputFormat, quiet: bool) {
    let src = read_source(file, output, quiet);
    let rule = rule.unwrap_or(Rule::Program);

    let result = match rule {
        Rule::Program => bugs_core::parse(&src).map(Some),
        other => bugs_core::parse_rule(&src, other),
    };

    let tree = match result {
        Ok(Some(tree)) => tree,
        Ok(None) => {
            let msg = format!("{}: input does not start with a {}", file.display(), rule);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
        Err(e) => {
            report_parse_error(file, &e, output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    let summary = Summary::of(&tree, rule);
    match output {
        OutputFormat::Json => {
            let mut value = serde_json::json!({
                "file":  file.display().to_string(),
                "rule":  rule.name(),
                "ok":    true,
                "nodes": summary.nodes,
            });
            if let Some((bugs, functions)) = summary.program {
                value["bugs"] = serde_json::json!(bugs);
                value["functions"] = serde_json::json!(functions);
            }
            let json = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        OutputFormat::Text => match summary.program {
            Some((bugs, functions)) => println!(
                "ok: {} ({} bug definition(s), {} function(s))",
                file.display(),
                bugs,
                functions
            ),
            None => println!("ok: {} ({}, {} nodes)", file.display(), rule, summary.nodes),
        },
    }
}

struct Summary {
    nodes: usize,
    /// Bug and function counts, for whole programs.
    program: Option<(usize, usize)>,
}

impl Summary {
    fn of(tree: &Tree, rule: Rule) -> Self {
        let program = (rule == Rule::Program).then(|| {
            let count = |t: Option<&Tree>| t.map_or(0, |t| t.children().len());
            let bugs = tree.child(1).map(Tree::children).unwrap_or_default();
            // Allbugs(vars, functions); Bug(name, vars, initially, commands, functions)
            let shared = count(tree.child(0).and_then(|a| a.child(1)));
            let own: usize = bugs.iter().map(|b| count(b.child(4))).sum();
            (bugs.len(), shared + own)
        });
        Summary {
            nodes: tree.size(),
            program,
        }
    }
}
