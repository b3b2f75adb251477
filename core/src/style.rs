use std::collections::HashMap;

use colored::{Color, ColoredString, Colorize};
use crossterm::terminal;
use strum::IntoEnumIterator as _;

use crate::grading::{Grade, GradeReason, Similarity};

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {{
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }}
}

pub fn is_truecolor_supported() -> bool {
    let Ok(v) = std::env::var("COLORTERM") else {
        return false
    };
    matches!(v.as_str(), "truecolor" | "24bit")
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for GradeReason {
    fn color(&self) -> Color {
        use GradeReason::*;
        if !self::is_truecolor_supported() {
            return match self {
                Excellent => Color::Green,
                Similar => Color::Cyan,
                Wrong => Color::Yellow,
                Timeout => Color::Red,
                CompilationError => Color::Magenta,
                NoCFile => Color::BrightBlack,
            };
        }

        match self {
            Excellent => Color::TrueColor {
                r: 30,
                g: 180,
                b: 40,
            },
            Similar => Color::TrueColor {
                r: 20,
                g: 150,
                b: 170,
            },
            Wrong => Color::TrueColor {
                r: 210,
                g: 138,
                b: 4,
            },
            Timeout => Color::TrueColor {
                r: 220,
                g: 42,
                b: 42,
            },
            CompilationError => Color::TrueColor {
                r: 171,
                g: 40,
                b: 200,
            },
            NoCFile => Color::TrueColor {
                r: 110,
                g: 110,
                b: 110,
            },
        }
    }
}

impl ColorTheme for Similarity {
    fn color(&self) -> Color {
        GradeReason::from(*self).color()
    }
}

fn badge(text: impl std::fmt::Display, bg: Color) -> ColoredString {
    let fg = if is_truecolor_supported() {
        Color::TrueColor {
            r: 255,
            g: 255,
            b: 255,
        }
    } else {
        Color::BrightBlack
    };
    format!(" {} ", text).on_color(bg).bold().color(fg)
}

pub fn reason_icon(reason: GradeReason) -> ColoredString {
    badge(reason, reason.color())
}

pub fn similarity_icon(similarity: Similarity) -> ColoredString {
    badge(similarity, similarity.color())
}

/// Width of the widest reason label, for aligning progress lines.
pub fn reason_label_width() -> usize {
    GradeReason::iter()
        .map(|r| r.to_string().len())
        .max()
        .unwrap_or(0)
}

pub fn average_score(grades: &[Grade]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    let total: u32 = grades.iter().map(|g| g.score).sum();
    total as f64 / grades.len() as f64
}

pub fn print_grade_summary(grades: &[Grade]) {
    let (cols, _) = terminal::size().unwrap_or((40, 40));
    const BOLD_LINE: &str = "━";
    println!("{}", BOLD_LINE.repeat(cols as usize).blue().bold());

    let bar = "-".repeat(5);
    print!("{} ", bar);

    if grades.is_empty() {
        print!("{}", "No submissions graded".bright_yellow());
        println!(" {}", bar);
        return;
    }

    let count: HashMap<GradeReason, usize> = grades.iter().fold(HashMap::new(), |mut count, g| {
        *count.entry(g.reason).or_default() += 1;
        count
    });

    let num_total = grades.len();
    let num_excellent = *count.get(&GradeReason::Excellent).unwrap_or(&0);

    let headline = format!(
        "{} submissions graded, average {:.1}",
        num_total,
        average_score(grades)
    );
    if num_excellent == num_total {
        print!("{} ✨", headline.green());
    } else {
        // fixed order so the line reads the same run to run
        let detail_msg = GradeReason::iter()
            .filter_map(|reason| count.get(&reason).map(|&cnt| (reason, cnt)))
            .map(|(reason, cnt)| {
                format!(
                    "{}{}{}",
                    self::reason_icon(reason),
                    "x".dimmed(),
                    cnt.to_string().bold().bright_white(),
                )
            })
            .collect::<Vec<String>>()
            .join(", ");

        print!("{} ({})", headline.bright_white(), detail_msg);
    }

    println!(" {}", bar);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn print_success_is_an_expression() {
        let printed: () = match Some(3) {
            Some(n) => print_success!("graded {} submissions", n),
            None => (),
        };
        assert_eq!(printed, ());
    }

    #[test]
    fn average_of_scores() {
        let grades = [
            Grade::new("a", GradeReason::Excellent),
            Grade::new("b", GradeReason::Wrong),
            Grade::new("c", GradeReason::NoCFile),
        ];
        assert_eq!(average_score(&grades), 50.0);
        assert_eq!(average_score(&[]), 0.0);
    }

    #[test]
    fn label_width_fits_longest_reason() {
        assert_eq!(reason_label_width(), "COMPILATION_ERROR".len());
    }
}
