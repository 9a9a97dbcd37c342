//! Integration tests for the multi-statement repository operations:
//! notification fan-out, meeting registration, room assignment and
//! resident profiles.

use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate, Utc};
use residence_db::filter::ListFilter;
use residence_db::models::mail::NewMail;
use residence_db::models::meeting::CreateMeeting;
use residence_db::models::notification::CreateNotification;
use residence_db::models::resident_profile::{FamilyMemberInput, ResidentProfileInput};
use residence_db::models::room::CreateRoom;
use residence_db::models::user::{CreateUser, User};
use residence_db::repositories::{
    AssignOutcome, MailOutboxRepo, MeetingRepo, NotificationRepo, RegistrationOutcome,
    ResidentProfileRepo, RoomRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: role.to_string(),
            phone: None,
        },
    )
    .await
    .unwrap()
}

fn new_meeting(capacity: Option<i32>) -> CreateMeeting {
    CreateMeeting {
        title: "Annual assembly".to_string(),
        description: None,
        location: "Lobby".to_string(),
        meeting_at: Utc::now() + Duration::days(7),
        organizer: Some("Board".to_string()),
        capacity,
    }
}

fn confirmation(
    meeting: &residence_db::models::meeting::Meeting,
    registration: &residence_db::models::meeting::MeetingRegistration,
) -> NewMail {
    NewMail {
        recipient: registration.email.clone(),
        subject: format!("Registered: {}", meeting.title),
        body: "See you there".to_string(),
    }
}

fn family(name: &str) -> FamilyMemberInput {
    FamilyMemberInput {
        full_name: name.to_string(),
        relationship: "child".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2015, 6, 1),
        phone: None,
    }
}

fn profile(full_name: &str, members: Vec<FamilyMemberInput>) -> ResidentProfileInput {
    ResidentProfileInput {
        full_name: full_name.to_string(),
        date_of_birth: None,
        gender: None,
        id_number: Some("ID-001".to_string()),
        phone: None,
        occupation: None,
        hometown: None,
        family_members: members,
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_publish_queues_mail_for_target_role(pool: PgPool) {
    let admin = seed_user(&pool, "admin@example.com", "admin").await;
    seed_user(&pool, "r1@example.com", "resident").await;
    seed_user(&pool, "r2@example.com", "resident").await;

    let input = CreateNotification {
        title: "Water shutoff".to_string(),
        content: "Tuesday 9-12".to_string(),
        target_role: "resident".to_string(),
    };
    let (notification, queued) =
        NotificationRepo::publish(&pool, Some(admin.id), &input, "Water shutoff", "Tuesday 9-12")
            .await
            .unwrap();
    assert_eq!(notification.created_by, Some(admin.id));
    assert_eq!(queued, 2);

    assert!(MailOutboxRepo::list_for_recipient(&pool, "admin@example.com")
        .await
        .unwrap()
        .is_empty());
    let mail = MailOutboxRepo::list_for_recipient(&pool, "r1@example.com")
        .await
        .unwrap();
    assert_eq!(mail.len(), 1);
    assert_eq!(mail[0].subject, "Water shutoff");
    assert_eq!(mail[0].status, "pending");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_notifications_visible_by_role(pool: PgPool) {
    for (title, target) in [("All", "all"), ("Admins", "admin"), ("Residents", "resident")] {
        let input = CreateNotification {
            title: title.to_string(),
            content: "body".to_string(),
            target_role: target.to_string(),
        };
        NotificationRepo::publish(&pool, None, &input, title, "body")
            .await
            .unwrap();
    }

    let mut titles: Vec<_> = NotificationRepo::list_for_role(&pool, "resident")
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.title)
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["All", "Residents"]);
}

// ---------------------------------------------------------------------------
// Meetings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_meeting_registration_enqueues_confirmation(pool: PgPool) {
    let user = seed_user(&pool, "attendee@example.com", "resident").await;
    let meeting = MeetingRepo::create(&pool, &new_meeting(None)).await.unwrap();

    let outcome = MeetingRepo::register(&pool, meeting.id, user.id, confirmation)
        .await
        .unwrap();
    let registration = assert_matches!(outcome, RegistrationOutcome::Registered(r) => r);
    assert_eq!(registration.email, "attendee@example.com");

    let mail = MailOutboxRepo::list_for_recipient(&pool, "attendee@example.com")
        .await
        .unwrap();
    assert_eq!(mail.len(), 1);
    assert_eq!(mail[0].subject, "Registered: Annual assembly");

    let again = MeetingRepo::register(&pool, meeting.id, user.id, confirmation)
        .await
        .unwrap();
    assert_matches!(again, RegistrationOutcome::AlreadyRegistered);
    assert_eq!(
        MailOutboxRepo::list_for_recipient(&pool, "attendee@example.com")
            .await
            .unwrap()
            .len(),
        1,
        "a rejected registration must not queue mail"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_meeting_capacity_is_enforced(pool: PgPool) {
    let first = seed_user(&pool, "first@example.com", "resident").await;
    let second = seed_user(&pool, "second@example.com", "resident").await;
    let meeting = MeetingRepo::create(&pool, &new_meeting(Some(1))).await.unwrap();

    assert_matches!(
        MeetingRepo::register(&pool, meeting.id, first.id, confirmation)
            .await
            .unwrap(),
        RegistrationOutcome::Registered(_)
    );
    assert_matches!(
        MeetingRepo::register(&pool, meeting.id, second.id, confirmation)
            .await
            .unwrap(),
        RegistrationOutcome::Full
    );
    // An attendee already holding the last seat is told so, not that it is full.
    assert_matches!(
        MeetingRepo::register(&pool, meeting.id, first.id, confirmation)
            .await
            .unwrap(),
        RegistrationOutcome::AlreadyRegistered
    );

    assert!(MeetingRepo::unregister(&pool, meeting.id, first.id).await.unwrap());
    assert_matches!(
        MeetingRepo::register(&pool, meeting.id, second.id, confirmation)
            .await
            .unwrap(),
        RegistrationOutcome::Registered(_)
    );

    let registrations = MeetingRepo::list_registrations(&pool, meeting.id)
        .await
        .unwrap();
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0].user_id, second.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_for_missing_meeting(pool: PgPool) {
    let user = seed_user(&pool, "lost@example.com", "resident").await;
    let outcome = MeetingRepo::register(&pool, 777, user.id, confirmation)
        .await
        .unwrap();
    assert_matches!(outcome, RegistrationOutcome::MeetingNotFound);
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_room_resident_assignment(pool: PgPool) {
    let user = seed_user(&pool, "tenant@example.com", "resident").await;
    let room = RoomRepo::create(
        &pool,
        &CreateRoom {
            room_number: "A-101".to_string(),
            floor: 1,
            area: Some(42.5),
            room_type: Some("studio".to_string()),
            status: "occupied".to_string(),
        },
    )
    .await
    .unwrap();

    let assigned = RoomRepo::add_resident(&pool, room.id, user.id).await.unwrap();
    let resident = assert_matches!(assigned, AssignOutcome::Assigned(r) => r);
    assert_eq!(resident.email, "tenant@example.com");

    assert_matches!(
        RoomRepo::add_resident(&pool, room.id, user.id).await.unwrap(),
        AssignOutcome::AlreadyAssigned
    );
    assert_matches!(
        RoomRepo::add_resident(&pool, room.id, 9999).await.unwrap(),
        AssignOutcome::UserNotFound
    );
    assert_matches!(
        RoomRepo::add_resident(&pool, 9999, user.id).await.unwrap(),
        AssignOutcome::RoomNotFound
    );

    assert_eq!(RoomRepo::list_residents(&pool, room.id).await.unwrap().len(), 1);

    // Deleting the room cascades the assignment.
    assert!(RoomRepo::delete(&pool, room.id).await.unwrap());
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM room_residents")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

// ---------------------------------------------------------------------------
// Resident profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_resident_profile_replaces_family(pool: PgPool) {
    let user = seed_user(&pool, "family@example.com", "resident").await;

    let created = ResidentProfileRepo::create(
        &pool,
        user.id,
        &profile("Jane Doe", vec![family("Kid One"), family("Kid Two")]),
    )
    .await
    .unwrap();
    assert_eq!(created.personal.user_id, user.id);
    assert_eq!(created.family_members.len(), 2);

    let updated = ResidentProfileRepo::update(
        &pool,
        created.personal.id,
        &profile("Jane Q. Doe", vec![family("Kid Three")]),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.personal.full_name, "Jane Q. Doe");
    let names: Vec<_> = updated
        .family_members
        .iter()
        .map(|m| m.full_name.as_str())
        .collect();
    assert_eq!(names, vec!["Kid Three"]);

    let by_user = ResidentProfileRepo::find_by_user(&pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_user.family_members.len(), 1);

    let listed = ResidentProfileRepo::list(&pool, &ListFilter::search(Some("jane")))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].family_members.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_second_profile_for_user_rejected(pool: PgPool) {
    let user = seed_user(&pool, "once@example.com", "resident").await;
    ResidentProfileRepo::create(&pool, user.id, &profile("Once", vec![family("Kid")]))
        .await
        .unwrap();

    let err = ResidentProfileRepo::create(&pool, user.id, &profile("Twice", vec![]))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(db) if db.constraint() == Some("uq_personal_info_user"));

    let members: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM family_members")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(members, 1, "the failed transaction must not leave rows behind");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_profile_returns_none(pool: PgPool) {
    let result = ResidentProfileRepo::update(&pool, 31337, &profile("Nobody", vec![family("X")]))
        .await
        .unwrap();
    assert!(result.is_none());
    let members: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM family_members")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(members, 0);
}
