use chrono::{NaiveDate, TimeZone, Utc};
use pushkind_tours::domain::itinerary::{
    DayPlan, ItemPosition, ItineraryAction, ItineraryItem,
};
use pushkind_tours::domain::tour::{StoredTour, TourData};
use pushkind_tours::domain::types::{ItemType, TourId};
use pushkind_tours::editor::draft::DetailsChange;
use pushkind_tours::editor::{
    DAY_WITHOUT_ITEMS, DurationPolicy, EditorError, EditorStep, ItineraryEditor, SubmitMode,
};

fn details(editor: &mut ItineraryEditor, duration: &str) {
    let changes = [
        DetailsChange::Title("Rajasthan <b>highlights</b>".into()),
        DetailsChange::Source("Delhi".into()),
        DetailsChange::Destinations(vec!["Jaipur".into(), "Udaipur".into()]),
        DetailsChange::Duration(duration.into()),
        DetailsChange::StartDate(NaiveDate::from_ymd_opt(2024, 10, 1)),
        DetailsChange::EndDate(NaiveDate::from_ymd_opt(2024, 10, 4)),
        DetailsChange::NumberOfTravellers(2),
        DetailsChange::Tags(vec!["heritage".into()]),
    ];
    for change in changes {
        editor.update(change).unwrap();
    }
}

fn add(day: usize) -> ItineraryAction {
    ItineraryAction::AddItem {
        day,
        item_type: ItemType::Activities,
    }
}

fn seeded(policy: DurationPolicy) -> ItineraryEditor {
    let tour = StoredTour {
        tour_id: TourId::new("tour-42").unwrap(),
        organization_id: Some(7),
        tour_data: TourData {
            title: "Goa beaches".into(),
            duration: "2 Days 1 Night".into(),
            itinerary: vec![DayPlan {
                day: 1,
                items: vec![ItineraryItem {
                    item_type: ItemType::Accommodation,
                    details: "Beach resort".into(),
                }],
            }],
            created_at: Some(Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap()),
            ..TourData::default()
        },
    };
    ItineraryEditor::from_stored(tour).with_policy(policy)
}

#[test]
fn duration_without_seed_builds_numbered_empty_days() {
    let mut editor = ItineraryEditor::new();
    editor.set_duration("3 Days 2 Nights").unwrap();

    let days: Vec<u32> = editor.days().iter().map(|d| d.day).collect();
    assert_eq!(days, vec![1, 2, 3]);
    assert!(editor.days().iter().all(|d| d.items.is_empty()));
}

#[test]
fn moving_the_only_item_blocks_the_itinerary_step() {
    let mut editor = ItineraryEditor::new();
    details(&mut editor, "2 Days 1 Night");
    assert_eq!(editor.next().unwrap(), EditorStep::Itinerary);

    editor.apply(add(0)).unwrap();
    editor.apply(add(1)).unwrap();
    let before = editor.days()[1].items.len();

    editor
        .apply(ItineraryAction::MoveItem {
            from: ItemPosition { day: 0, index: 0 },
            to: Some(ItemPosition { day: 1, index: 0 }),
        })
        .unwrap();
    assert!(editor.days()[0].items.is_empty());
    assert_eq!(editor.days()[1].items.len(), before + 1);

    match editor.next() {
        Err(EditorError::InvalidStep { step, errors }) => {
            assert_eq!(step, EditorStep::Itinerary);
            assert_eq!(errors.get("itinerary"), Some(DAY_WITHOUT_ITEMS));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(editor.step(), EditorStep::Itinerary);
    assert!(editor.errors().contains("itinerary"));
}

#[test]
fn filling_every_empty_day_unblocks_the_gate() {
    let mut editor = ItineraryEditor::new();
    details(&mut editor, "3 Days 2 Nights");
    editor.next().unwrap();

    editor.apply(add(1)).unwrap();
    assert!(editor.next().is_err());

    for day in 0..editor.days().len() {
        if editor.days()[day].items.is_empty() {
            editor.apply(add(day)).unwrap();
        }
    }
    assert!(!editor.errors().contains("itinerary"));
    assert_eq!(editor.next().unwrap(), EditorStep::Photos);
    assert_eq!(editor.next().unwrap(), EditorStep::Preview);
}

#[test]
fn cancelled_drag_changes_nothing() {
    let mut editor = ItineraryEditor::new();
    editor.set_duration("2 Days 1 Night").unwrap();
    editor.apply(add(0)).unwrap();
    let before = editor.days().to_vec();

    editor
        .apply(ItineraryAction::MoveItem {
            from: ItemPosition { day: 0, index: 0 },
            to: None,
        })
        .unwrap();
    assert_eq!(editor.days(), before.as_slice());
}

#[test]
fn seeded_duration_change_regenerates_days() {
    let mut editor = seeded(DurationPolicy::Regenerate);
    assert_eq!(editor.days().len(), 1);
    assert_eq!(editor.days()[0].items.len(), 1);

    editor.set_duration("3 Days 2 Nights").unwrap();

    let days: Vec<u32> = editor.days().iter().map(|d| d.day).collect();
    assert_eq!(days, vec![1, 2, 3]);
    assert!(editor.days().iter().all(|d| d.items.is_empty()));
}

#[test]
fn seeded_duration_change_can_preserve_days() {
    let mut editor = seeded(DurationPolicy::Preserve);

    editor.set_duration("3 Days 2 Nights").unwrap();

    let days: Vec<u32> = editor.days().iter().map(|d| d.day).collect();
    assert_eq!(days, vec![1, 2, 3]);
    assert_eq!(editor.days()[0].items[0].details, "Beach resort");
    assert!(editor.days()[1].items.is_empty());
}

#[test]
fn submission_reuses_id_and_creation_time() {
    let mut editor = seeded(DurationPolicy::Preserve);
    details(&mut editor, "2 Days 1 Night");
    for _ in 0..3 {
        editor.next().unwrap();
    }

    let now = Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap();
    let submission = editor.begin_submit(now).unwrap();

    assert_eq!(submission.mode, SubmitMode::Update);
    assert_eq!(submission.draft_id.as_str(), "tour-42");
    let data = &submission.payload.tour_data;
    assert_eq!(data.created_at, Some(Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap()));
    assert_eq!(data.updated_at, Some(now));
    assert_eq!(data.title, "Rajasthan <b>highlights</b>");

    assert_eq!(
        editor.update(DetailsChange::Title("Changed".into())),
        Err(EditorError::SubmissionPending)
    );

    editor.complete_submit(false);
    editor.update(DetailsChange::Title("Changed".into())).unwrap();
    assert_eq!(editor.draft().title, "Changed");
}
