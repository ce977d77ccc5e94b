//! The `examsheet init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("examsheet.toml").exists() {
        println!("examsheet.toml already exists, skipping.");
    } else {
        std::fs::write("examsheet.toml", SAMPLE_CONFIG)?;
        println!("Created examsheet.toml");
    }

    std::fs::create_dir_all("exams")?;
    let example_path = std::path::Path::new("exams/example.json");
    if example_path.exists() {
        println!("exams/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_EXAM)?;
        println!("Created exams/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit exams/example.json with your answer key");
    println!("  2. Run: examsheet validate --exam exams/example.json");
    println!("  3. Run: examsheet grade --exam exams/example.json --name \"Ana\" --answers A,B,C,D,A,B");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examsheet configuration

default_options = 4
request_timeout_secs = 30
# base_url = "https://${EXAM_HOST}/exams"

[messages]
score_total = "Puntaje total:"
score_by_subject = "Puntaje por materia:"
grade_label = "Calificar"
return_label = "Regresar"
"#;

const EXAMPLE_EXAM: &str = r#"{
  "title": "Examen de ejemplo",
  "numberOfOptions": 4,
  "correctAnswers": ["A", "B", "C", "D", "A", "B"],
  "sections": [
    { "title": "Matemáticas", "start": 1, "end": 3 },
    { "title": "Ciencias", "start": 4, "end": 6 }
  ]
}
"#;
