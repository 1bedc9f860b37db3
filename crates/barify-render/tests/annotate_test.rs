use barify_core::{Chapter, ParseOptions, parse_chapters};
use barify_render::annotate::place_annotations;
use barify_render::model::LayoutMode;
use barify_render::{LayoutOptions, layout_chapters};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn chapter(index: i64, side_text: &str) -> Chapter {
    Chapter {
        index,
        name: format!("Chapter {index}"),
        pages: 1,
        length: 0.5,
        color: "black".to_string(),
        side_text: side_text.to_string(),
    }
}

#[test]
fn labels_sit_below_the_first_bar_row_and_skip_empty_text() {
    let chapters = vec![chapter(1, "Part I"), chapter(2, ""), chapter(3, "Part II")];
    let labels = place_annotations(&chapters, &[0, 0, 1], 100.0, 10.0, 5.0);

    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].chapter_index, 1);
    assert_eq!(labels[0].text, "Part I");
    assert!(approx(labels[0].x, 100.0) && approx(labels[0].y, 15.0));
    assert_eq!(labels[1].chapter_index, 3);
    assert!(approx(labels[1].y, 25.0));
}

#[test]
fn text_column_shrinks_the_bar_area() {
    let chapters = parse_chapters("1,A,1,,first\n2,B,11\n3,C,21,,third\n", &ParseOptions::default())
        .expect("parse");
    let options = LayoutOptions {
        text_column_percent: Some(20.0),
        ..LayoutOptions::default()
    };
    let layout = layout_chapters(&chapters, &options).expect("layout");

    let margin_x = 210.0 * 0.04;
    let bar_area = 210.0 - 2.0 * margin_x - 42.0 - margin_x;
    assert!(approx(layout.rects[1].width, bar_area));

    assert_eq!(layout.labels.len(), 2);
    let text_x = margin_x + bar_area + margin_x;
    assert!(layout.labels.iter().all(|l| approx(l.x, text_x)));

    let margin_y = 297.0 * 0.04;
    let h = layout.line_height;
    assert!(approx(layout.labels[0].y, margin_y + h));
    assert!(approx(layout.labels[1].y, margin_y + 5.0 * h));
}

#[test]
fn block_mode_labels_follow_the_packed_starting_lines() {
    let text = "1,A,1,,one\n2,B,11\n3,C,21,,three\n4,D,26,,four\n";
    let chapters = parse_chapters(text, &ParseOptions::default()).expect("parse");
    let options = LayoutOptions {
        mode: LayoutMode::Block,
        bar_margin: 0.0,
        text_column_percent: Some(15.0),
        ..LayoutOptions::default()
    };
    let layout = layout_chapters(&chapters, &options).expect("layout");

    // Lengths 0, 1, 1, 0.5: B and C each fill a line, D starts on the third line.
    assert_eq!(layout.starting_lines, vec![0, 0, 1, 2]);
    let margin_y = 297.0 * 0.04;
    let h = layout.line_height;
    let ys: Vec<f64> = layout.labels.iter().map(|l| l.y).collect();
    assert_eq!(ys.len(), 3);
    assert!(approx(ys[0], margin_y + h));
    assert!(approx(ys[1], margin_y + 3.0 * h));
    assert!(approx(ys[2], margin_y + 5.0 * h));
}

#[test]
fn side_text_is_ignored_without_a_text_column() {
    let chapters =
        parse_chapters("1,A,1,,first\n2,B,11\n", &ParseOptions::default()).expect("parse");
    let layout = layout_chapters(&chapters, &LayoutOptions::default()).expect("layout");
    assert!(layout.labels.is_empty());
}
