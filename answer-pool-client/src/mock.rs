use shared_types::Answer;

/// Stand-in list used while no endpoint is reachable. Not real inventory.
pub fn mock_answers() -> Vec<Answer> {
    vec![
        Answer::new("1", "Option A - First Choice"),
        Answer::new("2", "Option B - Second Choice"),
        Answer::new("3", "Option C - Third Choice"),
        Answer::new("4", "Option D - Fourth Choice"),
        Answer::new("5", "Option E - Fifth Choice"),
    ]
}
