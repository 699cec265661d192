use edu_core::CompletionPolicy;
use edu_core::model::{CourseId, LiveClassId, ModuleId, QuestionId};
use edu_core::summary::KeyPointSummarizer;
use edu_core::time::fixed_now;
use services::{CatalogService, Clock, CompletionSource, LiveChat};
use storage::Storage;

#[tokio::test]
async fn mathematics_course_runs_to_full_completion() {
    let storage = Storage::with_samples().await.unwrap();
    let catalog = CatalogService::from_storage(&storage);
    let mut session = catalog
        .start_session(&CourseId::new("1"), CompletionPolicy::default())
        .await
        .unwrap();

    // Reading: summarize, then mark done.
    let summary = session.summarize_reading(&KeyPointSummarizer).unwrap();
    assert!(!summary.key_points.is_empty());
    let done = session.mark_reading_complete().unwrap();
    assert!(done.newly_completed);
    assert!((session.percent_complete() - 100.0 / 3.0).abs() < 1e-9);

    // Video: completion fires once at 90% watched.
    session.select_module(&ModuleId::new("1-2")).unwrap();
    {
        let video = session.video_mut().unwrap();
        video.on_metadata(600.0);
        assert!(video.play());
    }
    assert!(session.video_position(300.0).unwrap().is_none());
    let watched = session.video_position(540.0).unwrap().unwrap();
    assert!(matches!(watched.source, CompletionSource::Video(_)));
    assert!(session.video_position(590.0).unwrap().is_none());

    // Quiz: one wrong answer still completes under the default rule.
    session.select_module(&ModuleId::new("1-3")).unwrap();
    assert!(session.answer(&QuestionId::new("q1"), 2).unwrap().is_none());
    let graded = session.answer(&QuestionId::new("q2"), 3).unwrap().unwrap();
    match graded.source {
        CompletionSource::Quiz(result) => {
            assert_eq!(result.score, 1);
            assert_eq!(result.total, 2);
        }
        other => panic!("unexpected completion source: {other:?}"),
    }

    assert!((session.percent_complete() - 100.0).abs() < 1e-9);
    assert!(session.module_statuses().iter().all(|row| row.completed));
}

#[tokio::test]
async fn live_class_chat_accepts_learner_messages() {
    let storage = Storage::with_samples().await.unwrap();
    let catalog = CatalogService::from_storage(&storage);
    let class = catalog
        .get_live_class(&LiveClassId::new("live-1"))
        .await
        .unwrap();

    let mut chat = LiveChat::open(class, Clock::fixed(fixed_now()));
    assert_eq!(chat.messages()[0].time_label(), "14:05");
    assert_eq!(chat.messages()[3].time_label(), "14:08");

    chat.send("You", "Can we do one more example?").unwrap();
    assert_eq!(chat.messages().len(), 5);
    assert!(chat.send("You", "").is_err());
    assert_eq!(chat.messages().len(), 5);
}
