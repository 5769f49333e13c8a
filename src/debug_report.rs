use crate::format_duration;
use tempus::{ParseResultVerbose, PassStatus, RuleKind, RulePass};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, res: &ParseResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    let details = &res.details;
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", input), ansi::CYAN)));
    println!("  {} {}", palette.dim("reference:"), palette.paint(details.context.now.to_rfc3339(), ansi::GRAY));

    println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    for pass in &details.passes {
        print_pass(input, pass, &palette);
    }

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    let result = &res.result;
    println!("  {} {}", palette.dim("time:    "), palette.bold(palette.paint(result.time.to_rfc3339(), ansi::GREEN)));
    println!("  {} {}", palette.dim("duration:"), palette.paint(format_duration(result.duration), ansi::GREEN));
    if result.text.is_empty() {
        println!("  {} {}", palette.dim("text:    "), palette.dim("(empty)"));
    } else {
        println!("  {} \"{}\"", palette.dim("text:    "), result.text);
    }

    let applied = details.applied_rules();
    if applied.is_empty() {
        println!("  {} {}", palette.dim("applied: "), palette.dim("none"));
    } else {
        println!("  {} {}", palette.dim("applied: "), palette.paint(applied.join(" → "), ansi::BLUE));
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    let rules_total: std::time::Duration = details.passes.iter().map(|p| p.duration).sum();
    println!(
        "  Total: {}  │  Rules: {}  │  Reduce: {}",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.paint(format!("{:?}", rules_total), ansi::CYAN),
        palette.dim(format!("{:?}", details.reduce)),
    );
    println!();
}

fn print_pass(input: &str, pass: &RulePass, palette: &ansi::Palette) {
    let kind = match pass.kind {
        RuleKind::Time => "time",
        RuleKind::Duration => "duration",
    };
    let status = match pass.status {
        PassStatus::Applied(n) => palette.paint(format!("✓ {n} applied"), ansi::GREEN),
        PassStatus::NoMatch => palette.dim("✗ no match"),
        PassStatus::Disabled => palette.paint("– disabled", ansi::YELLOW),
        PassStatus::Gated => palette.dim("– gated"),
    };

    println!(
        "  {} {} {} {}",
        palette.paint(format!("{:<10}", pass.rule), ansi::BLUE),
        palette.dim(format!("{kind:<8}")),
        status,
        palette.dim(format!("{:?}", pass.duration)),
    );

    for span in &pass.spans {
        let preview = input.get(span.start..span.end).unwrap_or("");
        println!(
            "      {} {}",
            palette.paint(format!("{}..{}", span.start, span.end), ansi::YELLOW),
            palette.dim(format!("\"{preview}\"")),
        );
    }
}
