use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::Colorize;

use crate::config::Config;
use crate::error::*;
use crate::grading::{Grade, GradeReport, Grader, Submission};
use crate::interactive::{self, SpinnerExt as _};
use crate::style;

/// Grades every submission under the configured root in name order, appending each grade to
/// the results file as soon as it is known.
///
/// With `quiet`, nothing is drawn on the terminal.
pub async fn grade_all(cfg: &Config, quiet: bool) -> Result<Vec<Grade>> {
    let g = &cfg.grading;
    ensure!(
        g.input.is_file(),
        "Grading input not found: {}",
        g.input.to_string_lossy()
    );
    ensure!(
        g.expected_output.is_file(),
        "Expected output not found: {}",
        g.expected_output.to_string_lossy()
    );

    let submissions = Submission::enumerate(&g.submissions_dir).with_context(|| {
        format!(
            "Failed to list submissions in {}",
            g.submissions_dir.to_string_lossy()
        )
    })?;
    if submissions.is_empty() {
        log::warn!(
            "No submission dirs in {}",
            g.submissions_dir.to_string_lossy()
        );
    }

    let grader = Grader::new(cfg);
    let mut report = GradeReport::open(&g.results).context("Failed to open results file")?;
    log::info!(
        "Grading {} submissions (compiler: {}, time limit: {}ms)",
        submissions.len(),
        cfg.compile.program,
        g.time_limit_ms
    );
    log::info!(
        "Grades go to {}, child stderr to {}",
        report.path().to_string_lossy(),
        grader.runner().error_log().to_string_lossy()
    );

    let label_width = style::reason_label_width();
    let mut grades = Vec::with_capacity(submissions.len());

    for s in &submissions {
        let spinner = interactive::spinner(quiet)
            .with_message(format!("{} ...", s.name))
            .with_ticking();

        let started = Instant::now();
        let res = grader.grade(s).await;
        let elapsed = started.elapsed();

        let grade = match res {
            Ok(grade) => grade,
            Err(e) => {
                spinner
                    .lock()
                    .await
                    .finish_with_message(format!("{} ... {}", s.name, "aborted".bright_red()));
                return Err(e.context(format!("Failed to grade '{}'", s.name)));
            }
        };

        spinner.lock().await.finish_with_message({
            format!(
                "{} ... {}{} {:>3} [{}ms]",
                s.name,
                style::reason_icon(grade.reason),
                " ".repeat(label_width - grade.reason.to_string().len()),
                grade.score,
                elapsed.as_millis(),
            )
            .cyan()
            .to_string()
        });

        report.append(&grade)?;
        grades.push(grade);
    }

    if !quiet {
        println!();
        style::print_grade_summary(&grades);
    }
    Ok(grades)
}

/// Writes the example config into `dir`. Returns `None` if the user declined to overwrite an
/// existing one.
pub fn init_config(dir: impl AsRef<Path>, force: bool) -> Result<Option<PathBuf>> {
    let path = dir.as_ref().join(Config::FILENAME);

    if path.exists() && !force {
        let prompt = format!("{} already exists. Overwrite?", path.to_string_lossy());
        let yes = interactive::util::ask_confirm(&prompt, false)
            .context("Failed to read confirmation")?;
        if !yes {
            return Ok(None);
        }
    }

    fsutil::write_with_mkdir(&path, Config::example_toml())
        .context("Failed to write example config")?;
    Ok(Some(path))
}
