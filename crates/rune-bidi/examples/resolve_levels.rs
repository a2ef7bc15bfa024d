/// Print the embedding level of every character of a line of text
///
/// Run with: cargo run -p rune-bidi --example resolve_levels -- "abc אבג def"

use rune_bidi::{BidiData, BidiResolver};

fn main() {
    let text = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let text = if text.is_empty() {
        "car means \u{05DE}\u{05DB}\u{05D5}\u{05E0}\u{05D9}\u{05EA} (2 words)".to_string()
    } else {
        text
    };

    let config = rune_config::RuneConfig::load();
    let mut resolver = BidiResolver::from_config(&config.bidi);

    let mut data = BidiData::with_capacity(text.len());
    data.push_text(&text);
    let levels = resolver.process(&data.input()).to_vec();

    println!("Text: {}", text);
    println!(
        "Paragraph level: {} ({:?})",
        resolver.resolved_paragraph_level(),
        resolver.paragraph_direction()
    );
    println!();
    for ((ch, class), level) in text.chars().zip(data.classes()).zip(levels) {
        println!("  {:?}\t{}\t{}", ch, class, level);
    }
}
