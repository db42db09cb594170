use crate::model::{CaseResultRow, CaseStatus};
use crate::report::RunArtifacts;

pub fn print_summary(artifacts: &RunArtifacts) {
    print_rows(&artifacts.results);

    let s = &artifacts.summary;
    eprintln!(
        "Suite '{}': {} cases in {:.2}s",
        artifacts.suite,
        s.total_cases,
        (artifacts.finished_at - artifacts.started_at).num_milliseconds() as f64 / 1000.0
    );
    eprintln!(
        "Accuracy: exact {:.1}% ({}/{}), partial {:.1}% ({}/{})",
        s.exact_accuracy,
        s.exact_matches,
        s.total_cases,
        s.partial_accuracy,
        s.exact_matches + s.partial_matches,
        s.total_cases
    );
    eprintln!(
        "Lengths: answer avg {:.1} chars, expected avg {:.1} chars",
        s.average_answer_length, s.average_expected_length
    );
    eprintln!(
        "Results: pass={} fail={} error={}",
        s.passed, s.failed, s.errored
    );
}

fn print_rows(results: &[CaseResultRow]) {
    for r in results {
        match r.status {
            CaseStatus::Pass => {}
            CaseStatus::Fail => {
                eprintln!("FAIL [{}]: {}", r.case_id, r.message);
                eprintln!("    expected: {}", r.expected);
                eprintln!("    actual:   {}", r.actual);
            }
            CaseStatus::Error => eprintln!("ERROR [{}]: {}", r.case_id, r.message),
        }
    }
}
