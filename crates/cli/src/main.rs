//! Cursus CLI - inspect curriculum gating from the terminal.
//!
//! A thin adapter over the session layer: it renders what the engine
//! computes and writes progress through the store's authoring methods. No
//! gating logic lives here.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::Level;

use cursus_core::{
    AssignmentProgress, ContentType, ItemState, LessonProgress, Module, Quiz, QuizAttempt,
    QuizScope,
};
use cursus_engine::CourseEntry;
use cursus_session::CurriculumService;
use cursus_store::JsonStore;

#[derive(Parser)]
#[command(name = "cursus")]
#[command(about = "Curriculum sequencing and gating inspector", long_about = None)]
struct Cli {
    /// Data directory
    #[arg(long, default_value = ".cursus")]
    data_dir: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a learner's outline for a module
    Outline {
        /// Module ID
        module: String,
        /// Learner ID
        learner: String,
    },
    /// Mark a lesson completed for a learner
    CompleteLesson {
        /// Learner ID
        learner: String,
        /// Lesson ID
        lesson: String,
    },
    /// Record a graded quiz attempt for a learner
    AttemptQuiz {
        /// Learner ID
        learner: String,
        /// Quiz ID
        quiz: String,
        /// Achieved score (0-100)
        #[arg(value_parser = clap::value_parser!(u8).range(..=100))]
        score: u8,
    },
    /// Record an assignment submission for a learner
    SubmitAssignment {
        /// Learner ID
        learner: String,
        /// Assignment ID
        assignment: String,
    },
    /// Seed a demo module and print its IDs
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();
    let store = Arc::new(JsonStore::new(&cli.data_dir).await?);

    match cli.command {
        Commands::Outline { module, learner } => {
            let module = parse_id(&module, "module")?;
            let learner = parse_id(&learner, "learner")?;

            let service = CurriculumService::new(store.clone(), store);
            let outline = service.outline(learner, module).await?;

            println!("Module {} - {}%", outline.module_id, outline.progress_percent);
            if let Some(course) = outline.course_percent {
                println!("Course progress: {course}%");
            }
            println!("Course timeline ({})", outline.course_items.len());
            for item in &outline.course_items {
                let (kind, title) = match &item.entry {
                    CourseEntry::Lesson(l) => (l.content_type.as_str(), l.title.as_str()),
                    CourseEntry::Quiz(q) if item.parent_lesson_id.is_some() => {
                        ("quiz", q.title.as_str())
                    }
                    CourseEntry::Quiz(q) => ("standalone quiz", q.title.as_str()),
                };
                println!("  {} | {} | {}", format_state(item.state()), kind, title);
            }
            println!("Exercise timeline ({})", outline.exercise_items.len());
            for item in &outline.exercise_items {
                let grading = if item.graded { "graded" } else { "ungraded" };
                println!(
                    "  {} | assignment | {} ({})",
                    format_state(item.state()),
                    item.assignment.title,
                    grading,
                );
            }
        }
        Commands::CompleteLesson { learner, lesson } => {
            let learner = parse_id(&learner, "learner")?;
            let lesson = parse_id(&lesson, "lesson")?;
            store
                .record_lesson_progress(learner, &LessonProgress::completed_at(lesson, Utc::now()))
                .await?;
            println!("Completed lesson {} for {}", lesson, learner);
        }
        Commands::AttemptQuiz { learner, quiz, score } => {
            let learner = parse_id(&learner, "learner")?;
            let quiz = parse_id(&quiz, "quiz")?;
            store
                .record_quiz_attempt(
                    learner,
                    &QuizAttempt {
                        quiz_id: quiz,
                        score,
                        completed_at: Utc::now(),
                    },
                )
                .await?;
            println!("Recorded attempt ({score}) on quiz {} for {}", quiz, learner);
        }
        Commands::SubmitAssignment { learner, assignment } => {
            let learner = parse_id(&learner, "learner")?;
            let assignment = parse_id(&assignment, "assignment")?;
            store
                .record_assignment_progress(
                    learner,
                    &AssignmentProgress::submitted_at(assignment, Utc::now()),
                )
                .await?;
            println!("Submitted assignment {} for {}", assignment, learner);
        }
        Commands::Seed => {
            seed_demo(&store).await?;
        }
    }

    Ok(())
}

fn parse_id<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| anyhow::anyhow!("Invalid {what} ID: {raw}"))
}

fn format_state(state: ItemState) -> &'static str {
    match state {
        ItemState::Locked => "locked",
        ItemState::Unlocked => "open  ",
        ItemState::Completed => "done  ",
    }
}

async fn seed_demo(store: &JsonStore) -> Result<()> {
    let course_id = cursus_core::CourseId::new();
    let module = Module::new(course_id, "Getting started", 0);
    store.save_module(&module).await?;

    let mut lessons = Vec::new();
    for (i, (title, kind)) in [
        ("Welcome", ContentType::Video),
        ("Core concepts", ContentType::Text),
        ("First project", ContentType::Interactive),
    ]
    .into_iter()
    .enumerate()
    {
        let lesson = cursus_core::Lesson::new(module.id, title, kind, i as u32);
        store.save_lesson(&lesson).await?;
        lessons.push(lesson);
    }

    let checkpoint = Quiz::new("Concept check", QuizScope::Lesson(lessons[1].id), 0, 60);
    store.save_quiz(&checkpoint).await?;
    let fin = Quiz::new("Module exam", QuizScope::Module(module.id), 3, 70);
    store.save_quiz(&fin).await?;

    let essay =
        cursus_core::Assignment::new(course_id, Some(module.id), "Reflection essay", 100, 0);
    store.save_assignment(&essay).await?;

    println!("Seeded demo module");
    println!("  module:     {}", module.id);
    for lesson in &lessons {
        println!("  lesson:     {} ({})", lesson.id, lesson.title);
    }
    println!("  quiz:       {} ({})", checkpoint.id, checkpoint.title);
    println!("  quiz:       {} ({})", fin.id, fin.title);
    println!("  assignment: {} ({})", essay.id, essay.title);
    println!("  learner:    {}", cursus_core::LearnerId::new());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_quiz_rejects_scores_above_100() {
        let result = Cli::try_parse_from(["cursus", "attempt-quiz", "lrn", "quiz", "255"]);
        assert!(result.is_err());
    }

    #[test]
    fn attempt_quiz_accepts_the_full_scale() {
        for score in ["0", "100"] {
            let result = Cli::try_parse_from(["cursus", "attempt-quiz", "lrn", "quiz", score]);
            assert!(result.is_ok());
        }
    }
}
