//! The `quizdesk init` command.

use std::path::Path;

use anyhow::Result;

use quizdesk_core::config::CONFIG_FILE_NAME;

const SAMPLE_QUESTIONS_FILE: &str = "engineering_mcqs.json";

pub fn execute() -> Result<()> {
    write_if_missing(Path::new(CONFIG_FILE_NAME), SAMPLE_CONFIG)?;
    write_if_missing(Path::new(SAMPLE_QUESTIONS_FILE), SAMPLE_QUESTIONS)?;

    println!("\nNext steps:");
    println!("  1. Set admin_password in {CONFIG_FILE_NAME} (or QUIZDESK_ADMIN_PASSWORD)");
    println!("  2. Run: quizdesk validate");
    println!("  3. Run: quizdesk take --count 10");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdesk configuration

questions_file = "engineering_mcqs.json"
history_file = "score_history.json"
export_dir = "."
# QUIZDESK_ADMIN_PASSWORD overrides this value
admin_password = "adminaccess"
seconds_per_question = 60
"#;

const SAMPLE_QUESTIONS: &str = r#"[
    {
        "question": "Which chart is used to schedule project activities against time?",
        "options": ["Gantt chart", "Pareto chart", "Control chart", "Pie chart"],
        "answer": "Gantt chart"
    },
    {
        "question": "The critical path in a project network has how much total float?",
        "options": ["Zero", "Maximum", "Equal to free float", "Negative"],
        "answer": "Zero"
    },
    {
        "question": "PERT uses how many time estimates per activity?",
        "options": ["One", "Two", "Three", "Four"],
        "answer": "Three"
    },
    {
        "question": "Break-even point is reached when total revenue equals",
        "options": ["Total cost", "Fixed cost", "Variable cost", "Profit"],
        "answer": "Total cost"
    },
    {
        "question": "Which theory of motivation proposes a hierarchy of needs?",
        "options": ["Maslow", "Herzberg", "McGregor", "Vroom"],
        "answer": "Maslow"
    },
    {
        "question": "The 80/20 rule is associated with",
        "options": ["Pareto analysis", "Value engineering", "Work study", "Six Sigma"],
        "answer": "Pareto analysis"
    },
    {
        "question": "Which inventory model gives the economic order quantity?",
        "options": ["Wilson's formula", "Little's law", "Bayes' rule", "Ohm's law"],
        "answer": "Wilson's formula"
    },
    {
        "question": "Span of control refers to",
        "options": [
            "Number of subordinates a manager supervises",
            "Length of a project",
            "Budget of a department",
            "Number of levels in an organisation"
        ],
        "answer": "Number of subordinates a manager supervises"
    },
    {
        "question": "Theory X and Theory Y were proposed by",
        "options": ["Douglas McGregor", "Peter Drucker", "Henri Fayol", "F. W. Taylor"],
        "answer": "Douglas McGregor"
    },
    {
        "question": "Which quality approach targets 3.4 defects per million opportunities?",
        "options": ["Six Sigma", "Kaizen", "5S", "Just-in-time"],
        "answer": "Six Sigma"
    }
]
"#;
