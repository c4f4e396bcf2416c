use super::*;

fn split(text: &str) -> Vec<&str> {
    SentenceSegmenter::default().split(text)
}

#[test]
fn test_simple_sentences() {
    assert_eq!(
        split("The sun rose. Birds sang! Was it spring?"),
        vec!["The sun rose.", "Birds sang!", "Was it spring?"]
    );
}

#[test]
fn test_sentences_are_trimmed() {
    assert_eq!(split("  Hello.   World.  \n"), vec!["Hello.", "World."]);
}

#[test]
fn test_empty_and_whitespace_text() {
    assert!(split("").is_empty());
    assert!(split("   \n\t").is_empty());
}

#[test]
fn test_text_without_terminator_is_one_sentence() {
    assert_eq!(split("no terminator here"), vec!["no terminator here"]);
}

#[test]
fn test_decimal_numbers_do_not_split() {
    assert_eq!(
        split("Pi is roughly 3.14 in most uses. Next sentence."),
        vec!["Pi is roughly 3.14 in most uses.", "Next sentence."]
    );
}

#[test]
fn test_sentence_ending_in_a_number_splits() {
    let segmenter = SentenceSegmenter::default();
    assert_eq!(segmenter.count("The rate rose to 2.5. Markets fell."), 2);
    assert_eq!(segmenter.count("Der Satz stieg auf 2,5. Die Märkte fielen."), 2);
    assert_eq!(
        split("Version 1.2.3. Released today."),
        vec!["Version 1.2.3.", "Released today."]
    );
}

#[test]
fn test_sentence_ending_in_a_domain_splits() {
    assert_eq!(
        split("Visit example.com. It is fast."),
        vec!["Visit example.com.", "It is fast."]
    );
}

#[test]
fn test_english_abbreviations() {
    assert_eq!(
        split("Dr. Smith arrived late. Mr. Jones did not."),
        vec!["Dr. Smith arrived late.", "Mr. Jones did not."]
    );
}

#[test]
fn test_german_abbreviations() {
    assert_eq!(
        split("Das kostet ca. Fünf Euro. Vgl. Abschnitt zwei."),
        vec!["Das kostet ca. Fünf Euro.", "Vgl. Abschnitt zwei."]
    );
}

#[test]
fn test_dotted_abbreviations() {
    assert_eq!(split("Fruit, e.g. Apples, is healthy."), vec![
        "Fruit, e.g. Apples, is healthy."
    ]);
    assert_eq!(
        split("Es gibt z.B. Äpfel. Ja."),
        vec!["Es gibt z.B. Äpfel.", "Ja."]
    );
    assert_eq!(split("He moved to the U.S. Last year."), vec![
        "He moved to the U.S. Last year."
    ]);
}

#[test]
fn test_initials_inside_a_name() {
    assert_eq!(
        split("J. R. R. Tolkien wrote it. Many read it."),
        vec!["J. R. R. Tolkien wrote it.", "Many read it."]
    );
    assert_eq!(
        split("Mr. J. Smith came. He left."),
        vec!["Mr. J. Smith came.", "He left."]
    );
}

#[test]
fn test_initial_after_ordinary_word_splits() {
    assert_eq!(
        split("We chose plan A. Then we left."),
        vec!["We chose plan A.", "Then we left."]
    );
    assert_eq!(
        split("Wir nahmen Variante B. Danach gingen wir."),
        vec!["Wir nahmen Variante B.", "Danach gingen wir."]
    );
}

#[test]
fn test_trailing_initials_still_split() {
    assert_eq!(split("A. B."), vec!["A.", "B."]);
    assert_eq!(split("A."), vec!["A."]);
}

#[test]
fn test_lowercase_continuation_does_not_split() {
    assert_eq!(
        split("it was fine. and then more happened."),
        vec!["it was fine. and then more happened."]
    );
}

#[test]
fn test_mixed_and_repeated_punctuation() {
    assert_eq!(
        split("Wait! Really?! Yes… Fine."),
        vec!["Wait!", "Really?!", "Yes…", "Fine."]
    );
}

#[test]
fn test_closing_quotes_stay_with_sentence() {
    assert_eq!(
        split("He said \"Stop.\" Then he left."),
        vec!["He said \"Stop.\"", "Then he left."]
    );
    assert_eq!(
        split("Sie sagte: „Genug!“ Dann ging sie."),
        vec!["Sie sagte: „Genug!“", "Dann ging sie."]
    );
}

#[test]
fn test_locale_selection() {
    let german = SentenceSegmenter::for_locale(Locale::German);
    let english = SentenceSegmenter::for_locale(Locale::English);

    assert_eq!(german.count("Mr. Smith came."), 2);
    assert_eq!(english.count("Mr. Smith came."), 1);
    assert_eq!(german.locales(), &[Locale::German]);
    assert_eq!(
        SentenceSegmenter::default().locales(),
        &[Locale::English, Locale::German]
    );
}

#[test]
fn test_count_matches_split() {
    let text = "Heute ist das Wetter sehr schön. Wir gehen spazieren.";
    let segmenter = SentenceSegmenter::default();
    assert_eq!(segmenter.count(text), segmenter.split(text).len());
    assert_eq!(segmenter.count(text), 2);
}

#[test]
fn test_split_borrows_from_input() {
    let text = String::from("One. Two.");
    let sentences = split(&text);
    let range = text.as_bytes().as_ptr_range();
    assert!(sentences.iter().all(|s| range.contains(&s.as_ptr())));
}
