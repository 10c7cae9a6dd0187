//! Custom assertions for transcript output

/// Number of per-combination headers (`### {...}`) in a transcript
pub fn count_combination_headers(transcript: &str) -> usize {
    transcript
        .lines()
        .filter(|line| line.starts_with("### {"))
        .count()
}

/// Assert that every fenced block in the transcript is closed
pub fn assert_fences_balanced(transcript: &str) {
    let fences = transcript.lines().filter(|line| *line == "```").count();
    assert!(
        fences % 2 == 0,
        "Unbalanced code fences ({} markers)\nTranscript:\n{}",
        fences,
        transcript
    );
}

/// Assert that the transcript contains a substring, showing it on failure
pub fn assert_transcript_contains(transcript: &str, needle: &str) {
    assert!(
        transcript.contains(needle),
        "Expected transcript to contain {:?}\nTranscript:\n{}",
        needle,
        transcript
    );
}
