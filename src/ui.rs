use crate::search::MatchResult;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

pub fn print_banner() {
    println!();
    println!(
        "   {}  {}",
        "PANTRY".yellow().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("   {}", "Find recipes by what is in your kitchen".white());
    println!();
}

pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn log_error(msg: &str) {
    eprintln!("{} {}", "✖ Error:".red().bold(), msg);
}

pub fn log_success(msg: &str) {
    println!("{} {}", "✔ Success:".green().bold(), msg);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// Splits `text` into plain and highlighted runs, marking every
/// case-insensitive occurrence of any term. Overlapping hits merge.
pub fn highlight_segments<'a, S: AsRef<str>>(text: &'a str, terms: &[S]) -> Vec<Segment<'a>> {
    // Byte offsets into `lower` map back to the source char they came from.
    let mut lower = String::with_capacity(text.len());
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (idx, ch) in text.char_indices() {
        for lc in ch.to_lowercase() {
            lower.push(lc);
            for _ in 0..lc.len_utf8() {
                origin.push((idx, idx + ch.len_utf8()));
            }
        }
    }

    let mut marked = vec![false; text.len()];
    for term in terms {
        let term = term.as_ref();
        if term.is_empty() {
            continue;
        }
        for (start, hit) in lower.match_indices(term) {
            let from = origin[start].0;
            let to = origin[start + hit.len() - 1].1;
            marked[from..to].iter_mut().for_each(|m| *m = true);
        }
    }

    let mut segments: Vec<Segment<'a>> = Vec::new();
    let mut run_start = 0;
    for (idx, _) in text.char_indices().skip(1) {
        if marked[idx] != marked[run_start] {
            segments.push(Segment {
                text: &text[run_start..idx],
                highlighted: marked[run_start],
            });
            run_start = idx;
        }
    }
    if run_start < text.len() {
        segments.push(Segment {
            text: &text[run_start..],
            highlighted: marked[run_start],
        });
    }
    segments
}

/// One sentence per entry; each keeps its closing period.
pub fn preparation_sentences(preparation: &str) -> Vec<&str> {
    preparation
        .split_inclusive('.')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

pub fn format_result(
    index: usize,
    result: &MatchResult<'_>,
    terms: &[String],
    show_preparation: bool,
) -> String {
    let recipe = result.recipe;
    let mut out = format!("{}. {}\n", index + 1, recipe.name.0.bold().underline());

    if let Some(image) = &recipe.image {
        out.push_str(&format!("   {} {}\n", "Image:".dimmed(), image.dimmed()));
    }

    out.push_str(&format!("   {}\n", "Ingredients:".bold()));
    for ingredient in &recipe.ingredients {
        let line: String = highlight_segments(ingredient, terms)
            .into_iter()
            .map(|seg| {
                if seg.highlighted {
                    seg.text.black().on_yellow().to_string()
                } else {
                    seg.text.to_string()
                }
            })
            .collect();
        out.push_str(&format!("     • {}\n", line));
    }

    if !result.missing_terms.is_empty() {
        let missing: Vec<String> = result
            .missing_terms
            .iter()
            .map(|t| format!("X {}", t).red().to_string())
            .collect();
        out.push_str(&format!("   {} {}\n", "Missing:".bold(), missing.join(", ")));
    }

    out.push_str(&format!(
        "   {} {}\n",
        "Matching:".bold(),
        format!("{:.2}%", result.match_percentage).green()
    ));

    if show_preparation {
        out.push_str(&format!("   {}\n", "Preparation:".bold()));
        for sentence in preparation_sentences(&recipe.preparation) {
            out.push_str(&format!("     {}\n", sentence));
        }
    } else {
        out.push_str(&format!(
            "   {}\n",
            "Preparation hidden (use --preparation to show)".dimmed()
        ));
    }

    out
}

pub fn print_results(results: &[MatchResult<'_>], terms: &[String], show_preparation: bool) {
    println!("{}", "SEARCH RESULTS".bold().underline());
    if results.is_empty() {
        println!("No recipes found with these ingredients.");
    } else {
        for (index, result) in results.iter().enumerate() {
            println!("{}", format_result(index, result, terms, show_preparation));
        }
    }
    println!();
}
