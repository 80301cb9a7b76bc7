use std::io::Write;

use maze_content::{ConfigLoader, QuestionLoader, QuestionPool};
use maze_core::{MazeGenerator, QuestionSource, RectangleMazeGenerator};

#[test]
fn loads_catalog_and_config_from_disk() {
    let dir = tempfile::tempdir().unwrap();

    let catalog_path = dir.path().join("questions.ron");
    let mut catalog = std::fs::File::create(&catalog_path).unwrap();
    writeln!(
        catalog,
        r#"(questions: [
            (question: "One", answer: "1", kind: ShortAnswer),
            (question: "Two", answer: "2", kind: ShortAnswer),
        ])"#
    )
    .unwrap();

    let config_path = dir.path().join("game.toml");
    std::fs::write(
        &config_path,
        "[maze]\nmaze_height = 2\nmaze_width = 2\nroom_height = 5\nroom_width = 5\nstart = [0, 0]\nexit = [1, 1]\n",
    )
    .unwrap();

    let questions = QuestionLoader::load(&catalog_path).unwrap();
    let config = ConfigLoader::load(&config_path).unwrap();
    let pool = QuestionPool::new(questions, 3).unwrap();

    let maze = RectangleMazeGenerator::new(config.maze, pool).generate().unwrap();
    assert_eq!(maze.doors().len(), 4);
    for door in maze.doors() {
        let question = door.question();
        assert!(question.question() == "One" || question.question() == "Two");
    }
}

#[test]
fn missing_file_names_the_path() {
    let error = QuestionLoader::load(std::path::Path::new("/nonexistent/questions.ron")).unwrap_err();
    assert!(error.to_string().contains("/nonexistent/questions.ron"));
}

#[test]
fn builtin_pool_never_runs_dry() {
    let mut pool = QuestionPool::new(QuestionLoader::builtin().unwrap(), 11).unwrap();
    for _ in 0..(pool.len() * 3) {
        assert!(!pool.next_question().answer().is_empty());
    }
}
