// Colored terminal output for search results and topic reports.
//
// This module handles all terminal-specific formatting: colors, bars,
// summary lines. The main.rs display paths delegate here.

use colored::Colorize;

use crate::corpus::vocabulary::Vocabulary;
use crate::model::TopicModel;
use crate::pipeline::search::SearchResult;

/// Display the coherence table for a completed search, best candidate last.
pub fn display_search_result(result: &SearchResult) {
    if result.candidates.is_empty() {
        println!("No candidates completed. Check the logs for failures.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Coherence by topic count ({} candidates) ===",
            result.candidates.len()
        )
        .bold()
    );
    println!();

    let best = result.best().map(|c| c.num_topics);
    let max = result
        .candidates
        .iter()
        .map(|c| c.coherence)
        .fold(f64::MIN, f64::max);
    let min = result
        .candidates
        .iter()
        .map(|c| c.coherence)
        .fold(f64::MAX, f64::min);
    let span = (max - min).max(f64::EPSILON);
    let bar_width: usize = 30;

    for candidate in &result.candidates {
        let filled = (((candidate.coherence - min) / span) * bar_width as f64).round() as usize;
        let bar = format!(
            "[{}{}]",
            "=".repeat(filled),
            " ".repeat(bar_width.saturating_sub(filled))
        );
        let colored_bar = if Some(candidate.num_topics) == best {
            bar.bright_green()
        } else {
            bar.bright_blue()
        };
        let marker = if Some(candidate.num_topics) == best {
            "*"
        } else {
            " "
        };
        println!(
            "  {} {:>3} topics {} {:.4}",
            marker, candidate.num_topics, colored_bar, candidate.coherence
        );
    }

    for failure in &result.failures {
        println!(
            "  {} {:>3} topics {}",
            "!".red(),
            failure.num_topics,
            format!("failed: {}", failure.error).dimmed()
        );
    }

    if let Some(best) = result.best() {
        println!(
            "\n  Best candidate: {} topics (coherence {:.4})",
            best.num_topics.to_string().bold(),
            best.coherence
        );
    }
}

/// Display a trained model's topics with weight bars.
pub fn display_topics(
    model: &TopicModel,
    vocabulary: &Vocabulary,
    num_topics: usize,
    num_words: usize,
) {
    println!(
        "\n{}",
        format!("=== Topics ({} of {}) ===", num_topics.min(model.num_topics()), model.num_topics()).bold()
    );
    println!();

    for topic in 0..num_topics.min(model.num_topics()) {
        println!("{}", format!("Topic {}:", topic + 1).bold());
        for (id, weight) in model.top_terms(topic, num_words) {
            let term = vocabulary.token(id).unwrap_or("?");
            println!("\t{}: {}", term, format!("{weight:.4}").dimmed());
        }
        println!();
    }
}
