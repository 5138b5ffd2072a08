use std::path::Path;

use crate::{read_source, OutputFormat};

pub(crate) fn cmd_tokens(file: &Path, output: OutputFormat, quiet: bool) {
    let src = read_source(file, output, quiet);
    let tokens = bugs_core::lex(&src);

    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&tokens)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        OutputFormat::Text => {
            for t in &tokens {
                let text = match t.token.text.as_str() {
                    "\n" => "\\n",
                    other => other,
                };
                println!("{:>4} {:<7} {}", t.line, t.token.kind.as_str(), text);
            }
        }
    }
}
