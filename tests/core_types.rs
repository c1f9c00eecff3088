use boxmerge::{iou, BBox, BoxMergeError, Detection, DetectionSet, PostProcessor};

fn bbox(coords: [f32; 4]) -> BBox {
    BBox::from_array(coords).unwrap()
}

#[test]
fn bbox_rejects_inverted_corners() {
    let err = BBox::new(5.0, 0.0, 1.0, 10.0).err().unwrap();
    assert_eq!(
        err,
        BoxMergeError::InvalidBox {
            x1: 5.0,
            y1: 0.0,
            x2: 1.0,
            y2: 10.0,
        }
    );
}

#[test]
fn bbox_accessors_and_area() {
    let b = bbox([2.0, 3.0, 12.0, 8.0]);
    assert_eq!(b.x1(), 2.0);
    assert_eq!(b.y1(), 3.0);
    assert_eq!(b.x2(), 12.0);
    assert_eq!(b.y2(), 8.0);
    assert_eq!(b.width(), 10.0);
    assert_eq!(b.height(), 5.0);
    assert_eq!(b.area(), 50.0);
}

#[test]
fn self_iou_is_one() {
    for coords in [
        [0.0, 0.0, 10.0, 10.0],
        [3.5, 1.25, 4.0, 900.0],
        [100.0, 200.0, 640.0, 480.0],
    ] {
        let b = bbox(coords);
        assert_eq!(iou(&b, &b), 1.0);
    }
}

#[test]
fn iou_is_symmetric() {
    let a = bbox([0.0, 0.0, 10.0, 10.0]);
    let b = bbox([4.0, -3.0, 17.0, 6.0]);
    assert_eq!(iou(&a, &b), iou(&b, &a));
    assert!(iou(&a, &b) > 0.0 && iou(&a, &b) < 1.0);
}

#[test]
fn iou_of_disjoint_boxes_is_zero() {
    let a = bbox([0.0, 0.0, 10.0, 10.0]);
    let b = bbox([100.0, 100.0, 110.0, 110.0]);
    assert_eq!(iou(&a, &b), 0.0);
}

#[test]
fn iou_with_zero_area_box_is_zero() {
    let point = bbox([5.0, 5.0, 5.0, 5.0]);
    let flat = bbox([0.0, 5.0, 10.0, 5.0]);
    let full = bbox([0.0, 0.0, 10.0, 10.0]);
    assert_eq!(iou(&point, &full), 0.0);
    assert_eq!(iou(&full, &flat), 0.0);
    assert_eq!(iou(&point, &point), 0.0);
}

#[test]
fn detection_set_validates_each_row() {
    let err = DetectionSet::from_columns(
        &[[0.0, 0.0, 10.0, 10.0], [0.0, 0.0, 10.0, 10.0]],
        &[0.9, 1.2],
        &[1, 1],
    )
    .err()
    .unwrap();
    assert_eq!(err, BoxMergeError::InvalidScore { score: 1.2 });

    let err = DetectionSet::from_columns(&[[0.0, 10.0, 10.0, 0.0]], &[0.9], &[1])
        .err()
        .unwrap();
    assert!(matches!(err, BoxMergeError::InvalidBox { .. }));
}

#[test]
fn detection_set_collects_from_iterator() {
    let dets: DetectionSet = (0..3)
        .map(|i| {
            let x = i as f32 * 20.0;
            Detection::new(bbox([x, 0.0, x + 10.0, 10.0]), 0.9, i).unwrap()
        })
        .collect();
    assert_eq!(dets.len(), 3);
    let labels: Vec<u32> = dets.iter().map(|d| d.label()).collect();
    assert_eq!(labels, vec![0, 1, 2]);
}

#[test]
fn error_messages_name_the_problem() {
    let err = BoxMergeError::LengthMismatch {
        boxes: 2,
        scores: 3,
        labels: 2,
    };
    assert_eq!(
        err.to_string(),
        "column length mismatch: 2 boxes, 3 scores, 2 labels"
    );
}

#[test]
fn out_of_range_scores_are_rejected_at_every_entry_point() {
    let b = bbox([0.0, 0.0, 10.0, 10.0]);
    for score in [7.5, -0.5, f32::NAN, f32::INFINITY] {
        assert!(matches!(
            Detection::new(b, score, 1),
            Err(BoxMergeError::InvalidScore { .. })
        ));
        assert!(matches!(
            DetectionSet::from_columns(&[[0.0, 0.0, 10.0, 10.0]], &[score], &[1]),
            Err(BoxMergeError::InvalidScore { .. })
        ));
    }

    let set = DetectionSet::from_columns(
        &[[0.0, 0.0, 10.0, 10.0], [1.0, 1.0, 11.0, 11.0]],
        &[1.0, 0.8],
        &[1, 2],
    )
    .unwrap();
    let out = PostProcessor::default().process(set);
    let summary = out.summary();
    assert_eq!(summary.count, 1);
    assert!((0.0..=1.0).contains(&summary.max_score));
    assert!(out.iter().all(|d| (0.0..=1.0).contains(&d.score())));
}
