// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use bend_assist_core::{AssistKind, DeductionAlgorithm, Part};
use bend_assist_geo::{read_part, write_part, WriteOptions};
use bend_assist_geometry::{connected_chain, BendLineInfo, Line, Point};
use bend_assist_processing::{
    process_batch, process_geo, run, summarize, AssistRequest, BatchJob, Config, Error,
};

const TEMPLATE: &str = "#~1\r\n##~~\r\n#~11\r\nBlech\r\n1\r\n0\r\n0\r\n0\r\nDC04\r\n2.000000000\r\n##~~\r\n\
#~31\r\n##~~\r\n#~331\r\n##~~\r\n#~KONT_END\r\n#~END\r\n#~EOF\r\n";

fn part(corners: &[(f64, f64)], bends: &[((f64, f64), (f64, f64))]) -> Part {
    let mut points: Vec<Point> = corners.iter().map(|&(x, y)| Point::new(x, y)).collect();
    points.push(points[0]);
    let bend_lines = bends
        .iter()
        .enumerate()
        .map(|(i, &((x1, y1), (x2, y2)))| {
            Line::bend(
                Point::new(x1, y1),
                Point::new(x2, y2),
                i as i32 + 1,
                BendLineInfo::new(90.0, 2.0, 3.665),
            )
        })
        .collect();
    Part::new(connected_chain(0, &points), bend_lines, 2.0).unwrap()
}

fn l_part() -> Part {
    part(
        &[(0.0, 0.0), (100.0, 0.0), (100.0, 70.0), (20.0, 70.0), (20.0, 50.0), (0.0, 50.0)],
        &[((20.0, 50.0), (100.0, 50.0))],
    )
}

fn rectangle() -> Part {
    part(&[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0), (0.0, 50.0)], &[])
}

fn document(part: &Part) -> String {
    write_part(part, TEMPLATE, &WriteOptions::default())
}

fn config() -> Config {
    Config {
        batch_threads: 2,
        ..Config::default()
    }
}

#[test]
fn flange_parameters_default_to_config() {
    let config = Config {
        flange_height: 20.0,
        ..config()
    };
    let request = AssistRequest::MakeFlange {
        edge: Some(1),
        angle: None,
        height: None,
        radius: None,
    };

    let processed = run(&rectangle(), &request, &config).unwrap();
    assert_eq!(processed.applied(), AssistKind::AddFlange);
    // Flange length is the height minus half the deduction
    assert_relative_eq!(processed.part().bound().min_y, -(20.0 - 3.665 / 2.0), epsilon = 1e-9);
}

#[test]
fn request_algorithm_overrides_config() {
    let config = Config {
        deduction_algorithm: DeductionAlgorithm::PartiallyDistributed,
        ..config()
    };
    let vertical = part(
        &[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0), (0.0, 50.0)],
        &[((50.0, 0.0), (50.0, 50.0))],
    );

    // Partial distribution only handles horizontal bend lines
    let err = run(&vertical, &AssistRequest::BendDeduction { algorithm: None }, &config).unwrap_err();
    assert!(err.is_inapplicable());

    let request = AssistRequest::BendDeduction {
        algorithm: Some(DeductionAlgorithm::EquallyDistributed),
    };
    let processed = run(&vertical, &request, &config).unwrap();
    assert_relative_eq!(processed.part().bound().width(), 100.0 - 3.665, epsilon = 1e-9);
}

#[test]
fn geo_document_in_geo_document_out() {
    let text = document(&l_part());
    let out = process_geo(
        &text,
        &AssistRequest::BendRelief,
        &config(),
        &WriteOptions::with_date("17.10.2026"),
    )
    .unwrap();

    let processed = read_part(&out).unwrap();
    assert_eq!(processed.plines().len(), 9);
    assert_eq!(processed.bend_lines().len(), 1);
    assert!(out.contains("DC04"));
}

#[test]
fn inapplicable_assist_is_reported() {
    let text = document(&rectangle());
    let err = process_geo(&text, &AssistRequest::CornerClose, &config(), &WriteOptions::default())
        .unwrap_err();
    assert!(err.is_inapplicable());
    assert_eq!(err.to_string(), "Cannot apply corner closing");

    let err = process_geo("#~31\r\nP\r\n", &AssistRequest::BendRelief, &config(), &WriteOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::Geo(_)));
}

#[test]
fn batch_keeps_job_order() {
    let jobs: Vec<BatchJob> = (0..6)
        .map(|i| BatchJob {
            name: format!("part-{i}"),
            text: document(&(if i % 2 == 0 { l_part() } else { rectangle() })),
            request: AssistRequest::BendRelief,
        })
        .collect();

    let outcomes = process_batch(&jobs, &config(), &WriteOptions::default()).unwrap();
    assert_eq!(outcomes.len(), 6);
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.name, format!("part-{i}"));
        // Rectangles have no bend line to relieve
        assert_eq!(outcome.result.is_ok(), i % 2 == 0);
    }
}

#[test]
fn summary_of_processed_part() {
    let processed = run(&l_part(), &AssistRequest::BendRelief, &config()).unwrap();
    let summary = summarize(processed.part());
    assert_eq!(summary.plines, 9);
    assert_eq!(summary.bend_lines, 1);
    assert_relative_eq!(summary.area, 6800.0);
    assert!(summary.assists.contains(&AssistKind::BendDeduction));
}
