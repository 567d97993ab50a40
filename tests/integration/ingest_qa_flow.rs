use std::io::Cursor;

use adqa::domain::ad::{AdProperties, Checks, ExpectedValues};
use adqa::domain::report::QaReport;
use adqa::engine::{ingest, qa};
use serde_json::json;

const HEADER: &str = "Campaign name,Ad Set Name,Ad name,call_to_action_type,headline,Website URL";

fn export(rows: &[&str]) -> Cursor<Vec<u8>> {
    let mut text = HEADER.to_string();
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    Cursor::new(text.into_bytes())
}

fn expected_values() -> ExpectedValues {
    serde_json::from_value(json!({
        "ad_name": "TestAd1",
        "landing_page": "http://x.com/page",
        "cta": "LEARN_MORE",
        "cgens": {"NA": 1234, "LATAM": 1235},
        "campaigns": {"c1": ["a1", "a2"], "c2": ["b1"]}
    }))
    .expect("expected values")
}

#[test]
fn clean_export_passes_end_to_end() {
    let hierarchy = ingest::parse(
        export(&[
            "c1,a1,TestAd1,LEARN_MORE,h,http://x.com/page?sdid=1",
            "c1,a2,TestAd1,LEARN_MORE,h,http://x.com/page",
            "c2,b1,TestAd1,LEARN_MORE,h,http://x.com/page?utm=a?b",
            "c9,z9,Draft,NOPE,h,elsewhere",
        ]),
        Some("TestAd"),
    )
    .expect("parse");

    let report = qa::run(&hierarchy, &expected_values(), &Checks::default());
    assert_eq!(report, QaReport::passed());
}

#[test]
fn filter_excludes_rows_and_every_level_they_introduce() {
    let hierarchy = ingest::parse(
        export(&[
            "c1,a1,TestAd1,LEARN_MORE,h,http://x.com/page",
            "c9,z9,Draft,NOPE,h,elsewhere",
        ]),
        Some("TestAd"),
    )
    .expect("parse");

    assert!(
        hierarchy
            .iter_ads()
            .all(|(_, _, ad, _)| ad.contains("TestAd"))
    );
    assert!(!hierarchy.campaigns().contains_key("c9"));
}

#[test]
fn last_row_wins_before_checks_run() {
    let hierarchy = ingest::parse(
        export(&[
            "c1,a1,TestAd1,SHOP_NOW,h,http://x.com/wrong",
            "c1,a1,TestAd1,LEARN_MORE,h,http://x.com/page",
        ]),
        None,
    )
    .expect("parse");

    assert_eq!(
        hierarchy.get("c1", "a1", "TestAd1"),
        Some(&AdProperties::new("http://x.com/page", "LEARN_MORE"))
    );
    let report = qa::run(&hierarchy, &expected_values(), &Checks::default());
    let failures = report.failures.expect("missing placements");
    assert!(!failures.contains_key("c1 > a1 > TestAd1"));
    assert_eq!(failures.len(), 2);
}

#[test]
fn disabling_toggles_suppresses_only_their_reasons() {
    let hierarchy = ingest::parse(
        export(&[
            "c1,a1,WrongName,SHOP_NOW,h,http://x.com/other",
            "c1,a2,TestAd1,LEARN_MORE,h,http://x.com/page",
            "c2,b1,TestAd1,LEARN_MORE,h,http://x.com/page",
            "c3,q1,TestAd1,LEARN_MORE,h,http://x.com/page",
        ]),
        None,
    )
    .expect("parse");
    let expected = expected_values();

    let all = qa::run(&hierarchy, &expected, &Checks::default());
    assert_eq!(
        serde_json::to_value(&all).expect("serialize"),
        json!({
            "success": false,
            "failures": {
                "c1 > a1 > WrongName": ["Incorrect CTA", "Incorrect Ad Name", "Incorrect Landing Page"],
                "c3 > q1 > TestAd1": ["Ad in unexpected campaign and/or ad set"]
            }
        })
    );

    let without_cta = Checks {
        cta: false,
        ..Checks::default()
    };
    let report = qa::run(&hierarchy, &expected, &without_cta);
    assert_eq!(
        report.failures.expect("failures")["c1 > a1 > WrongName"],
        vec!["Incorrect Ad Name", "Incorrect Landing Page"]
    );

    let none = Checks {
        cta: false,
        ad_name: false,
        cgen: false,
        landing_page: false,
    };
    let report = qa::run(&hierarchy, &expected, &none);
    assert_eq!(
        serde_json::to_value(&report).expect("serialize"),
        json!({
            "success": false,
            "failures": {"c3 > q1 > TestAd1": ["Ad in unexpected campaign and/or ad set"]}
        })
    );
}

#[test]
fn completeness_pass_reports_unseen_placements_only() {
    let hierarchy = ingest::parse(
        export(&["c1,a1,TestAd1,LEARN_MORE,h,http://x.com/page"]),
        None,
    )
    .expect("parse");

    let report = qa::run(&hierarchy, &expected_values(), &Checks::default());
    assert_eq!(
        serde_json::to_value(&report).expect("serialize"),
        json!({
            "success": false,
            "failures": {
                "c1 > a2": ["Ad is missing from expected ad set and campaign"],
                "c2 > b1": ["Ad is missing from expected ad set and campaign"]
            }
        })
    );
}

#[test]
fn validation_is_repeatable() {
    let hierarchy = ingest::parse(
        export(&[
            "c1,a1,ad1,SHOP_NOW,h,http://x.com/page",
            "c4,a4,TestAd1,LEARN_MORE,h,http://x.com/page",
        ]),
        None,
    )
    .expect("parse");
    let expected = expected_values();

    let first = serde_json::to_string(&qa::run(&hierarchy, &expected, &Checks::default()))
        .expect("serialize");
    let second = serde_json::to_string(&qa::run(&hierarchy, &expected, &Checks::default()))
        .expect("serialize");
    assert_eq!(first, second);
}
