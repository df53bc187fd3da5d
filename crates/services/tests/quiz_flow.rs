use services::{
    FlashcardDeck, QuizError, QuizMachine, QuizPhase, SubmitOutcome, cheatsheet_entries,
    generate_quiz_questions,
};
use study_core::derive_seed;
use study_core::model::{QuizSettings, Section, SectionFilter};
use study_core::pick::gcd;
use study_core::templates;
use study_core::time::fixed_clock;

const QUANT: SectionFilter = SectionFilter::Only(Section::Quant);

fn machine(settings: QuizSettings) -> QuizMachine {
    let mut machine = QuizMachine::new(12345, settings);
    machine.start().unwrap();
    machine
}

fn correct_index(machine: &QuizMachine) -> usize {
    machine.current_question().unwrap().final_answer_index()
}

fn wrong_index(machine: &QuizMachine) -> usize {
    let q = machine.current_question().unwrap();
    (q.final_answer_index() + 1) % q.final_choices().len()
}

#[test]
fn quant_session_has_reduced_fraction_answer() {
    let questions = generate_quiz_questions(12345, 0, QUANT).unwrap();
    assert_eq!(questions.len(), templates::matching(QUANT).count());

    let fraction = questions
        .iter()
        .find(|q| q.template_id().as_str() == "q-fraction-simplify")
        .unwrap();
    assert_eq!(
        fraction.variant_seed(),
        derive_seed(12345, "q-fraction-simplify", 0)
    );
    let (p, q) = fraction.final_answer().split_once('/').unwrap();
    let (p, q): (i64, i64) = (p.parse().unwrap(), q.parse().unwrap());
    assert_eq!(gcd(p, q), 1);
    assert_eq!(
        fraction.final_choices()[fraction.final_answer_index()],
        fraction.final_answer()
    );
}

#[test]
fn generation_is_deterministic_and_restart_reproducible() {
    let mut first = machine(QuizSettings::default());
    first.begin(SectionFilter::All).unwrap();
    let initial = first.session().unwrap().clone();
    first.restart().unwrap();
    let restarted = first.session().unwrap().clone();
    assert_ne!(initial.questions(), restarted.questions());

    let mut second = machine(QuizSettings::default());
    second.begin(SectionFilter::All).unwrap();
    assert_eq!(second.session().unwrap(), &initial);
    second.restart().unwrap();
    assert_eq!(second.session().unwrap(), &restarted);
}

#[test]
fn correct_answer_scores_and_advances() {
    let mut quiz = machine(QuizSettings::default());
    quiz.begin(QUANT).unwrap();
    let outcome = quiz.submit_answer(Some(correct_index(&quiz))).unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Correct {
            credit: 1.0,
            completed: false
        }
    );
    assert_eq!(quiz.score(), 1.0);
    assert_eq!(quiz.q_index(), 1);
    assert_eq!(quiz.attempts(), 0);
}

#[test]
fn two_wrong_answers_on_third_question_restart_the_session() {
    let mut quiz = machine(QuizSettings::default());
    quiz.begin(QUANT).unwrap();
    let original = quiz.session().unwrap().clone();

    for _ in 0..2 {
        quiz.submit_answer(Some(correct_index(&quiz))).unwrap();
    }
    assert_eq!(quiz.q_index(), 2);

    let third = quiz.current_question().unwrap().clone();
    let first_wrong = quiz.submit_answer(Some(wrong_index(&quiz))).unwrap();
    assert_eq!(first_wrong, SubmitOutcome::Incorrect { attempts_left: 1 });
    assert_eq!(quiz.q_index(), 2);

    let second_wrong = quiz.submit_answer(Some(wrong_index(&quiz))).unwrap();
    assert_eq!(
        second_wrong,
        SubmitOutcome::Restarted {
            revealed_answer: third.final_answer().to_owned(),
            revealed_index: third.final_answer_index(),
            attempt_number: 1,
        }
    );
    assert_eq!(quiz.phase(), QuizPhase::InProgress);
    assert_eq!(quiz.q_index(), 0);
    assert_eq!(quiz.score(), 0.0);
    assert_eq!(quiz.attempts(), 0);
    assert_eq!(quiz.attempt_number(), 1);
    assert_ne!(quiz.session().unwrap().questions(), original.questions());
    assert_eq!(quiz.session().unwrap().section_filter(), QUANT);
}

#[test]
fn answering_everything_completes_exactly_at_the_end() {
    let mut quiz = machine(QuizSettings::default());
    quiz.begin(SectionFilter::Only(Section::Integrated)).unwrap();
    let total = quiz.total();

    for answered in 1..=total {
        let outcome = quiz.submit_answer(Some(correct_index(&quiz))).unwrap();
        let done = answered == total;
        assert_eq!(
            outcome,
            SubmitOutcome::Correct {
                credit: 1.0,
                completed: done
            }
        );
        assert_eq!(quiz.phase() == QuizPhase::Complete, done);
    }
    assert_eq!(quiz.score(), total as f64);
    assert_eq!(quiz.progress().fraction(), 1.0);
    assert!(matches!(quiz.submit_answer(Some(0)), Err(QuizError::NotInProgress)));

    assert_eq!(quiz.retry().unwrap(), 1);
    assert_eq!(quiz.phase(), QuizPhase::InProgress);
    assert_eq!(quiz.q_index(), 0);
}

#[test]
fn change_section_returns_to_selection() {
    let mut quiz = machine(QuizSettings::default());
    quiz.begin(SectionFilter::Only(Section::Integrated)).unwrap();
    while quiz.phase() == QuizPhase::InProgress {
        quiz.submit_answer(Some(correct_index(&quiz))).unwrap();
    }
    quiz.change_section().unwrap();
    assert_eq!(quiz.phase(), QuizPhase::SectionSelect);
    quiz.begin(QUANT).unwrap();
    assert_eq!(quiz.total(), templates::matching(QUANT).count());
}

#[test]
fn verbal_has_no_questions() {
    let mut quiz = machine(QuizSettings::default());
    let err = quiz.begin(SectionFilter::Only(Section::Verbal)).unwrap_err();
    assert!(matches!(err, QuizError::NoQuestions { .. }));
    assert_eq!(quiz.phase(), QuizPhase::SectionSelect);
    assert!(quiz.session().is_none());

    quiz.begin(SectionFilter::All).unwrap();
    assert_eq!(quiz.phase(), QuizPhase::InProgress);
}

#[test]
fn partial_credit_halves_second_try() {
    let mut quiz = machine(QuizSettings::new(true, SectionFilter::All));
    quiz.begin_default().unwrap();
    quiz.submit_answer(Some(wrong_index(&quiz))).unwrap();
    let outcome = quiz.submit_answer(Some(correct_index(&quiz))).unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Correct {
            credit: 0.5,
            completed: false
        }
    );
    quiz.submit_answer(Some(correct_index(&quiz))).unwrap();
    assert_eq!(quiz.score(), 1.5);
}

#[test]
fn missing_selection_changes_nothing() {
    let mut quiz = machine(QuizSettings::default());
    quiz.begin(SectionFilter::All).unwrap();
    quiz.submit_answer(Some(wrong_index(&quiz))).unwrap();
    let before = quiz.run_state().clone();

    assert!(matches!(quiz.submit_answer(None), Err(QuizError::NoSelection)));
    assert_eq!(quiz.run_state(), &before);
    assert_eq!(quiz.attempts(), 1);
}

#[test]
fn quit_from_any_phase() {
    let mut quiz = machine(QuizSettings::default());
    quiz.quit();
    assert_eq!(quiz.phase(), QuizPhase::NotStarted);
    quiz.start().unwrap();
    quiz.begin(SectionFilter::All).unwrap();
    quiz.quit();
    assert_eq!(quiz.phase(), QuizPhase::NotStarted);
    assert!(quiz.current_question().is_none());
}

#[test]
fn clock_seeded_machine_matches_explicit_seed() {
    let clock = fixed_clock();
    let mut from_clock = QuizMachine::with_clock(clock, QuizSettings::default());
    let mut explicit = QuizMachine::new(clock.base_seed(), QuizSettings::default());
    for quiz in [&mut from_clock, &mut explicit] {
        quiz.start().unwrap();
        quiz.begin(SectionFilter::All).unwrap();
    }
    assert_eq!(from_clock.session(), explicit.session());
}

#[test]
fn study_views_cover_every_question() {
    let questions = generate_quiz_questions(77, 0, SectionFilter::All).unwrap();
    let mut deck = FlashcardDeck::from_questions(&questions);
    assert_eq!(deck.len(), questions.len());
    assert_eq!(deck.position_label(), format!("1 / {}", questions.len()));
    deck.previous();
    assert_eq!(deck.current(), Some(questions.last().unwrap().flashcard()));

    let entries = cheatsheet_entries(&questions);
    assert_eq!(entries.len(), questions.len());
    assert!(entries.iter().all(|e| !e.sheet.title.is_empty()));
}

#[test]
fn session_serializes_to_json() {
    let mut quiz = machine(QuizSettings::default());
    quiz.begin(SectionFilter::Only(Section::Integrated)).unwrap();
    let value = serde_json::to_value(quiz.session().unwrap()).unwrap();
    assert_eq!(value["base_seed"], 12345);
    assert_eq!(value["section_filter"], "integrated");
    let queue = value["queue"].as_array().unwrap();
    assert_eq!(queue.len(), 2);
    assert!(queue[0]["final_choices"].as_array().unwrap().len() >= 4);
    assert_eq!(queue[0]["section"], "integrated");
}
