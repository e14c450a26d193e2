use resenha::{Category, Classification, Outcome, Rule, Sentiment};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
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

pub fn print_run(res: &Classification, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Classifying: \"{}\"", res.text.trim()), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Text ━━━", ansi::GRAY));
    println!("  {} {}", palette.dim("normalized:"), res.normalized.trim());
    if let Some(pre) = &res.preprocessed {
        println!("  {} {}", palette.dim("preprocessed:"), pre);
    }

    println!("\n{}", palette.paint("━━━ Evidence ━━━", ansi::GRAY));
    print_evidence(res, &palette);

    println!("\n{}", palette.paint("━━━ Decision ━━━", ansi::GRAY));
    let position = match res.rule_position {
        Some(pos) => format!("#{pos}"),
        None => "-".to_string(),
    };
    println!(
        "  {} {} {} {}",
        palette.bold(paint_label(res.label, &palette)),
        palette.dim("│ rule:"),
        palette.paint(position, ansi::GRAY),
        palette.paint(res.rule, ansi::CYAN),
    );
    let active = res.evidence.categories().names();
    if active.is_empty() {
        println!("  {}", palette.dim("no lexicon hits"));
    } else {
        println!("  {} {}", palette.dim("signals:"), palette.paint(active.join(", "), ansi::BLUE));
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Scan: {}  │  Oracle: {}  │  Decide: {}",
        palette.paint(format!("{:?}", res.metrics.total), ansi::GREEN),
        palette.paint(format!("{:?}", res.metrics.scan), ansi::CYAN),
        palette.paint(format!("{:?}", res.metrics.oracle), ansi::YELLOW),
        palette.dim(format!("{:?}", res.metrics.decide)),
    );
    println!();
}

fn print_evidence(res: &Classification, palette: &ansi::Palette) {
    let ev = &res.evidence;
    for category in Category::ALL {
        let phrases = res.matched.get(category);
        let count = if phrases.is_empty() {
            palette.dim("✗ 0")
        } else {
            palette.paint(format!("✓ {}", phrases.len()), ansi::GREEN)
        };
        println!("  {} {}", palette.paint(format!("{:<19}", category.name()), ansi::BLUE), count);
        for phrase in phrases {
            println!("    {}", palette.paint(phrase, ansi::YELLOW));
        }
    }

    let flag = |on: bool| if on { palette.paint("yes", ansi::GREEN) } else { palette.dim("no") };
    println!("  {} {}", palette.paint(format!("{:<19}", "contradiction"), ansi::BLUE), flag(ev.has_contradiction));
    match res.neutral_pattern {
        Some(name) => println!(
            "  {} {} {}",
            palette.paint(format!("{:<19}", "neutral pattern"), ansi::BLUE),
            flag(true),
            palette.dim(format!("({name})"))
        ),
        None => println!("  {} {}", palette.paint(format!("{:<19}", "neutral pattern"), ansi::BLUE), flag(false)),
    }
    println!(
        "  {} {} {}",
        palette.paint(format!("{:<19}", "oracle"), ansi::BLUE),
        paint_label(ev.oracle_label.into(), palette),
        palette.dim(format!("{:.2}", ev.oracle_confidence)),
    );
}

pub fn print_rules(rules: &[Rule], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.paint("━━━ Decision cascade ━━━", ansi::GRAY));
    for (idx, rule) in rules.iter().enumerate() {
        let then = match rule.then {
            Outcome::Label(label) => paint_label(label, &palette),
            Outcome::FollowOracle => palette.paint("oracle", ansi::CYAN),
        };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("{:>2}.", idx + 1), ansi::GRAY),
            palette.bold(format!("{:<36}", rule.name)),
            palette.dim("→"),
            then
        );
    }
    println!();
}

fn paint_label(label: Sentiment, palette: &ansi::Palette) -> String {
    let color = match label {
        Sentiment::Positive => ansi::GREEN,
        Sentiment::Neutral => ansi::YELLOW,
        Sentiment::Negative => ansi::RED,
    };
    palette.paint(label.as_str(), color)
}
