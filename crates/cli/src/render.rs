//! Plain-text output.

use journey_core::{Articleship, AttemptOutcome, CourseLevel, CurriculumProfile, ExamAttempt};
use journey_progress::{journey_phase, progress_breakdown, Access, ProfileEditor, UnitTally};
use crate::format_status;

pub fn summary(editor: &ProfileEditor) {
    let profile = editor.profile();
    let breakdown = progress_breakdown(profile);

    let suffix = if editor.access() == Access::ReadOnly { " (read-only)" } else { "" };
    println!("{} - {}{}", profile.name, profile.state, suffix);
    println!("  Route: {}", profile.entry_route);
    println!("  Level: {} ({})", profile.current_level, journey_phase(profile));
    println!(
        "  Progress: {}% ({}/{})",
        breakdown.percentage(),
        breakdown.completed(),
        breakdown.total()
    );
    if let Some(foundation) = breakdown.foundation {
        tally("Foundation", foundation);
    }
    tally("Intermediate", breakdown.intermediate);
    tally("Articleship", breakdown.articleship);
    tally("SPOM", breakdown.self_paced);
    tally("Final", breakdown.final_stage);

    println!();
    println!("Timeline");
    for milestone in editor.milestones() {
        let marker = if milestone.is_current { ">" } else { " " };
        let date = milestone.date.map(|d| format!(" [{}]", d)).unwrap_or_default();
        println!(
            " {} {:<22} {:<12}{}",
            marker,
            milestone.title,
            format_status(milestone.status),
            date
        );
    }
}

fn tally(label: &str, tally: UnitTally) {
    println!("    {:<13} {}/{}", label, tally.completed, tally.total);
}

pub fn subjects(profile: &CurriculumProfile, levels: &[CourseLevel]) {
    for level in levels {
        let subjects = profile.subjects_for_level(*level);
        if subjects.is_empty() {
            continue;
        }
        println!("{}", level);
        for subject in subjects {
            let marks = subject.marks.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string());
            println!(
                "  {:<5} | {:<12} | {:>3} | {}",
                subject.id,
                format_status(subject.status),
                marks,
                subject.name
            );
        }
    }
}

pub fn articleship(articleship: &Articleship) {
    println!("Articleship: {}", format_status(articleship.status));
    if let Some(start) = articleship.start_date {
        println!("  Start: {}", start);
    }
    if let Some(end) = articleship.end_date {
        println!("  End: {}", end);
    }
    println!("  Leaves taken: {}", articleship.leaves_taken);
    println!("  Industrial training: {}", if articleship.industrial_training { "yes" } else { "no" });
}

pub fn attempt(attempt: &ExamAttempt) {
    println!(
        "  {} | {} #{} | {} | {} | total {}",
        attempt.id,
        attempt.level,
        attempt.attempt_number,
        attempt.term,
        outcome(attempt.outcome()),
        attempt.total_marks()
    );
    for group in &attempt.groups {
        for subject in &group.subjects {
            let exempt = if subject.is_exempt { " (exempt)" } else { "" };
            println!("      {:<5} {:>3}{}", subject.subject_id, subject.marks, exempt);
        }
    }
}

fn outcome(outcome: AttemptOutcome) -> &'static str {
    match outcome {
        AttemptOutcome::Pass => "PASS",
        AttemptOutcome::Fail => "FAIL",
    }
}
