use pretty_assertions::assert_eq;
use sqlx::sqlite::SqlitePool;

mod common;

#[tokio::test]
async fn feed_follows_timesheet_progress() {
    common::setup_test_env();
    let db = common::TestDb::new().await.unwrap();
    let timesheets = common::timesheet_service(&db.pool);
    let activities = common::activity_service(&db.pool);

    let manager = common::create_employee(&db.pool, "mia@example.com", "Mia", "Torres", "manager", None).await;
    let alice =
        common::create_employee(&db.pool, "alice@example.com", "Alice", "Nguyen", "employee", Some(manager)).await;
    let platform = common::create_project(&db.pool, "PLT-1", "Platform", None).await;

    let sheet = timesheets
        .create_timesheet(common::week_input(alice, "2024-01-01"))
        .await
        .unwrap();

    let feed = activities.recent_activities(alice, 5).await;
    assert!(feed
        .iter()
        .any(|a| a.title == "Timesheet created for week of Jan 01"));

    timesheets
        .add_entry(sheet.id, common::entry_input(platform, "2024-01-02", 8.0))
        .await
        .unwrap();
    timesheets.submit_timesheet(sheet.id, alice).await.unwrap();

    let feed = activities.recent_activities(alice, 5).await;
    assert!(feed
        .iter()
        .any(|a| a.title == "Timesheet submitted for week of Jan 01"));
    assert!(feed.iter().any(|a| a.title == "Logged 8 hours on Platform"));

    timesheets.approve_timesheet(sheet.id, manager).await.unwrap();

    let feed = activities.recent_activities(alice, 5).await;
    let approved = feed
        .iter()
        .find(|a| a.title == "Timesheet approved for week of Jan 01")
        .expect("approval activity missing");
    assert_eq!(approved.icon, "fa-check-circle");
    assert_eq!(approved.icon_color, "#28a745");
    assert_eq!(approved.time, "1 minute ago");
}

#[tokio::test]
async fn feed_is_truncated_to_limit_newest_first() {
    common::setup_test_env();
    let db = common::TestDb::new().await.unwrap();
    let timesheets = common::timesheet_service(&db.pool);
    let activities = common::activity_service(&db.pool);

    let alice = common::create_employee(&db.pool, "alice@example.com", "Alice", "Nguyen", "employee", None).await;

    for week in ["2024-01-01", "2024-01-08", "2024-01-15"] {
        timesheets
            .create_timesheet(common::week_input(alice, week))
            .await
            .unwrap();
    }

    let feed = activities.recent_activities(alice, 2).await;
    assert_eq!(feed.len(), 2);
    for activity in &feed {
        assert!(activity.title.starts_with("Timesheet created for week of"));
    }
}

#[tokio::test]
async fn manager_feed_mixes_projects_and_approvals() {
    common::setup_test_env();
    let db = common::TestDb::new().await.unwrap();
    let timesheets = common::timesheet_service(&db.pool);
    let activities = common::activity_service(&db.pool);

    let mia = common::create_employee(&db.pool, "mia@example.com", "Mia", "Torres", "manager", None).await;
    let alice =
        common::create_employee(&db.pool, "alice@example.com", "Alice", "Nguyen", "employee", Some(mia)).await;
    common::create_project(&db.pool, "PLT-1", "Platform", Some(mia)).await;
    let mobile = common::create_project(&db.pool, "MOB-1", "Mobile App", None).await;

    let sheet = timesheets
        .create_timesheet(common::week_input(alice, "2024-01-01"))
        .await
        .unwrap();
    timesheets
        .add_entry(sheet.id, common::entry_input(mobile, "2024-01-02", 8.0))
        .await
        .unwrap();
    timesheets.submit_timesheet(sheet.id, alice).await.unwrap();
    timesheets.approve_timesheet(sheet.id, mia).await.unwrap();

    let feed = activities.manager_activities(mia, 5).await;
    assert!(feed
        .iter()
        .any(|a| a.title == "New project \"Platform\" created"));
    assert!(feed
        .iter()
        .any(|a| a.title == "Approved timesheet for Alice Nguyen"));

    // Timeline is sorted most recent first
    for pair in feed.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }
}

#[tokio::test]
async fn feed_degrades_to_welcome_entry_on_internal_failure() {
    common::setup_test_env();

    // A pool with no schema makes every feed query fail
    let bare_pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    let activities = common::activity_service(&bare_pool);

    let feed = activities.recent_activities(1, 5).await;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].title, "Welcome to the timesheet system");
    assert_eq!(feed[0].icon, "fa-info-circle");
    assert_eq!(feed[0].time, "Just now");

    let feed = activities.manager_activities(1, 5).await;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].title, "Welcome to the timesheet system");
}
