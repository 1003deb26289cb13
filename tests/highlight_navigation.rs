use altre_find::navigator::NavigatorRegistry;
use altre_find::search::find_all;
use altre_find::{
    select_next, DocumentId, FindNextOutcome, FindSession, FindSettings, HighlightRange,
    MatchResult, NavigatorState, ScrollHint, SearchModel, SelectionOutcome,
};

fn three_ranges() -> Vec<HighlightRange> {
    vec![
        HighlightRange::new(0, 3),
        HighlightRange::new(10, 13),
        HighlightRange::new(20, 23),
    ]
}

#[test]
fn forward_past_last_range_notifies_then_wraps() {
    let ranges = three_ranges();
    let mut state = NavigatorState::new();

    let first = select_next(&ranges, 25, true, 30, &mut state);
    assert_eq!(first, SelectionOutcome::FirstPassExhausted { forward: true });

    let second = select_next(&ranges, 25, true, 30, &mut state);
    assert_eq!(second.selected_range(), Some((0, 3)));
}

#[test]
fn cycling_forward_visits_every_range_in_order() {
    let ranges = three_ranges();
    let mut state = NavigatorState::new();
    let mut caret = 0usize;
    let mut visited = Vec::new();

    for _ in 0..5 {
        match select_next(&ranges, caret, true, 30, &mut state) {
            SelectionOutcome::Selected { start, end, .. } => {
                visited.push((start, end));
                caret = start;
            }
            SelectionOutcome::FirstPassExhausted { .. } => visited.push((usize::MAX, 0)),
            SelectionOutcome::NotFound => break,
        }
    }

    assert_eq!(
        visited,
        vec![(10, 13), (20, 23), (usize::MAX, 0), (0, 3), (10, 13)]
    );
}

#[test]
fn cycling_backward_wraps_from_document_end() {
    let ranges = three_ranges();
    let mut state = NavigatorState::new();

    assert_eq!(
        select_next(&ranges, 10, false, 30, &mut state).selected_range(),
        Some((0, 3))
    );
    assert!(matches!(
        select_next(&ranges, 0, false, 30, &mut state),
        SelectionOutcome::FirstPassExhausted { forward: false }
    ));
    let wrapped = select_next(&ranges, 0, false, 30, &mut state);
    assert_eq!(wrapped.selected_range(), Some((20, 23)));
    assert!(matches!(
        wrapped,
        SelectionOutcome::Selected {
            scroll: ScrollHint::CenterDown,
            approached_from_top: true,
            ..
        }
    ));
}

#[test]
fn ranges_from_find_all_drive_navigation() {
    let text = "one two one three one";
    let model = SearchModel::new("one").whole_words_only(true);
    let ranges: Vec<HighlightRange> = find_all(text, &model)
        .unwrap()
        .iter()
        .filter_map(|m| m.range())
        .map(|r| HighlightRange::new(r.start, r.end))
        .collect();
    assert_eq!(ranges.len(), 3);

    let mut settings = FindSettings::default();
    let mut session = FindSession::default();
    session.commit_find(model.search_highlighters(true), &mut settings);
    let doc = DocumentId(42);

    let selected = |outcome: FindNextOutcome| match outcome {
        FindNextOutcome::Highlight(selection) => selection.selected_range(),
        FindNextOutcome::Text(_) => None,
    };
    assert_eq!(
        selected(session.find_next(doc, &ranges, text, 0, None).unwrap()),
        Some((8, 11))
    );
    assert_eq!(
        selected(session.find_previous(doc, &ranges, text, 8, None).unwrap()),
        Some((0, 3))
    );
}

#[test]
fn find_next_without_highlights_searches_text() {
    let text = "one two one three one";
    let mut settings = FindSettings::default();
    let mut session = FindSession::default();
    session.commit_find(
        SearchModel::new("one").search_highlighters(true),
        &mut settings,
    );

    // ハイライトがまだ無い文書ではテキスト検索に切り替わる
    let outcome = session.find_next(DocumentId(7), &[], text, 0, None).unwrap();
    assert_eq!(outcome, FindNextOutcome::Text(MatchResult::found(8, 11)));
    assert!(session.navigators().state(DocumentId(7)).is_none());
}

#[test]
fn registry_keeps_flags_per_document() {
    let ranges = three_ranges();
    let mut registry = NavigatorRegistry::new();

    let outcome = select_next(&ranges, 25, true, 30, registry.state_mut(DocumentId(1)));
    assert!(matches!(outcome, SelectionOutcome::FirstPassExhausted { .. }));
    assert!(registry.state_mut(DocumentId(1)).exhausted_once);
    assert!(!registry.state_mut(DocumentId(2)).exhausted_once);
}
