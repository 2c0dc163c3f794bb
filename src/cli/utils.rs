use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::router::Navigation;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

pub fn navigation_json(navigation: &Navigation) -> Value {
    json!({
        "route": navigation.route.name(),
        "path": navigation.path,
        "params": navigation.params,
        "redirected_from": navigation.redirected_from,
    })
}

/// Report which view the shell is showing now
pub fn output_navigation(output_format: &OutputFormat, navigation: &Navigation) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "navigation": navigation_json(navigation) }))?
            );
        }
        OutputFormat::Text => match &navigation.redirected_from {
            Some(from) => println!("→ {} ({}, redirected from {})", navigation.route, navigation.path, from),
            None => println!("→ {} ({})", navigation.route, navigation.path),
        },
    }
    Ok(())
}

/// Pretty-print an arbitrary JSON payload
pub fn output_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Split a prompt line into words; double quotes group words with spaces
pub fn split_words(line: &str) -> anyhow::Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut pending = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                pending = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }

    if in_quotes {
        anyhow::bail!("unterminated quote");
    }
    if pending {
        words.push(current);
    }

    Ok(words)
}
