mod common;

use chat_service::common::error::AppError;
use chat_service::entities::conversations::ConversationType;
use chat_service::entities::messages::MessageType;
use chat_service::usecases::{conversations, messages};
use common::{count_rows, seed_company, seed_coordinator, seed_student, test_state};
use std::time::Duration;

const ALICE: i64 = 1;
const BOB: i64 = 2;
const CAROL: i64 = 3;

#[tokio::test]
async fn direct_creation_is_idempotent() {
    let (state, _push) = test_state().await;
    seed_student(&state.db, ALICE, "Alice", "Cruz", Some("2021-00123"), "alice@uni.edu").await;
    seed_coordinator(&state.db, BOB, "Bob", "Reyes", "bob@uni.edu").await;

    let first = conversations::create_direct(&state, ALICE, BOB).await.unwrap();
    let second = conversations::create_direct(&state, ALICE, BOB).await.unwrap();
    let reversed = conversations::create_direct(&state, BOB, ALICE).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.id, reversed.id);
    assert_eq!(first.conversation_type, ConversationType::Direct);
    assert_eq!(first.name, "Direct Message");
    assert_eq!(first.participants.len(), 2);

    let direct_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM conversations WHERE conversation_type = ?")
            .bind("direct")
            .fetch_one(&state.db)
            .await
            .unwrap();
    assert_eq!(direct_count, 1);
}

#[tokio::test]
async fn direct_creation_requires_existing_peer() {
    let (state, _push) = test_state().await;
    seed_student(&state.db, ALICE, "Alice", "Cruz", None, "alice@uni.edu").await;

    let result = conversations::create_direct(&state, ALICE, 999).await;
    assert!(matches!(result, Err(AppError::UsersNotFound)));
}

#[tokio::test]
async fn group_creation_validates_inputs() {
    let (state, _push) = test_state().await;
    seed_student(&state.db, ALICE, "Alice", "Cruz", None, "alice@uni.edu").await;
    seed_coordinator(&state.db, BOB, "Bob", "Reyes", "bob@uni.edu").await;

    let result = conversations::create_group(&state, ALICE, "   ", &[BOB], None).await;
    assert!(matches!(result, Err(AppError::ConversationsInvalidName)));

    let result = conversations::create_group(&state, ALICE, "Interns", &[], None).await;
    assert!(matches!(
        result,
        Err(AppError::ConversationsInvalidParticipants)
    ));

    let result = conversations::create_group(&state, ALICE, "Interns", &[ALICE], None).await;
    assert!(matches!(
        result,
        Err(AppError::ConversationsInvalidParticipants)
    ));
}

#[tokio::test]
async fn group_creation_dedupes_the_caller() {
    let (state, _push) = test_state().await;
    seed_student(&state.db, ALICE, "Alice", "Cruz", None, "alice@uni.edu").await;
    seed_coordinator(&state.db, BOB, "Bob", "Reyes", "bob@uni.edu").await;

    let group =
        conversations::create_group(&state, ALICE, "Interns", &[BOB, ALICE, BOB], None)
            .await
            .unwrap();
    assert_eq!(group.conversation_type, ConversationType::Group);
    assert_eq!(group.participants.len(), 2);
    assert_eq!(group.created_by, ALICE);
}

#[tokio::test]
async fn listing_annotates_unread_and_last_message() {
    let (state, _push) = test_state().await;
    seed_student(&state.db, ALICE, "Alice", "Cruz", Some("2021-00123"), "alice@uni.edu").await;
    seed_coordinator(&state.db, BOB, "Bob", "Reyes", "bob@uni.edu").await;
    seed_company(&state.db, CAROL, "Acme Corp", "hr@acme.com").await;

    let direct = conversations::create_direct(&state, ALICE, BOB).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let group = conversations::create_group(&state, ALICE, "Interns", &[BOB, CAROL], None)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    messages::send(&state, direct.id, BOB, "Hello Alice", None, None)
        .await
        .unwrap();

    let listed = conversations::fetch_all_for_user(&state, ALICE).await.unwrap();
    assert_eq!(listed.len(), 2);
    // The direct conversation received the newer message, so it sorts first.
    assert_eq!(listed[0].id, direct.id);
    assert_eq!(listed[0].unread_count, 1);
    let last_message = listed[0].last_message.as_ref().unwrap();
    assert_eq!(last_message.content, "Hello Alice");
    assert_eq!(last_message.sender_name, "Bob Reyes");
    assert_eq!(last_message.sender_username, "Bob.Reyes");

    assert_eq!(listed[1].id, group.id);
    assert_eq!(listed[1].unread_count, 0);
    assert!(listed[1].last_message.is_none());

    let company = listed[1]
        .participants
        .iter()
        .find(|participant| participant.user_id == CAROL)
        .unwrap();
    assert_eq!(company.name, "Acme Corp");
}

#[tokio::test]
async fn group_updates_are_restricted() {
    let (state, _push) = test_state().await;
    seed_student(&state.db, ALICE, "Alice", "Cruz", None, "alice@uni.edu").await;
    seed_coordinator(&state.db, BOB, "Bob", "Reyes", "bob@uni.edu").await;
    seed_company(&state.db, CAROL, "Acme Corp", "hr@acme.com").await;

    let direct = conversations::create_direct(&state, ALICE, BOB).await.unwrap();
    let group = conversations::create_group(&state, ALICE, "Interns", &[BOB], None)
        .await
        .unwrap();

    let result = conversations::update_group_name(&state, group.id, CAROL, "Renamed").await;
    assert!(matches!(result, Err(AppError::ConversationsUnauthorized)));

    let result = conversations::update_group_name(&state, direct.id, ALICE, "Renamed").await;
    assert!(matches!(result, Err(AppError::ConversationsNotGroup)));

    let updated = conversations::update_group_name(&state, group.id, ALICE, "Cohort 2025")
        .await
        .unwrap();
    assert_eq!(updated.name, "Cohort 2025");

    let updated = conversations::update_group_avatar(
        &state,
        group.id,
        BOB,
        Some("https://cdn.example.com/group.png"),
    )
    .await
    .unwrap();
    assert_eq!(
        updated.avatar_url.as_deref(),
        Some("https://cdn.example.com/group.png")
    );
}

#[tokio::test]
async fn adding_a_member_twice_conflicts() {
    let (state, _push) = test_state().await;
    seed_student(&state.db, ALICE, "Alice", "Cruz", None, "alice@uni.edu").await;
    seed_coordinator(&state.db, BOB, "Bob", "Reyes", "bob@uni.edu").await;
    seed_company(&state.db, CAROL, "Acme Corp", "hr@acme.com").await;

    let group = conversations::create_group(&state, ALICE, "Interns", &[BOB], None)
        .await
        .unwrap();

    let updated = conversations::add_member(&state, group.id, ALICE, CAROL).await.unwrap();
    assert_eq!(updated.participants.len(), 3);

    // Membership changes land in the log as system messages.
    let announcement = updated.last_message.as_ref().unwrap();
    assert_eq!(announcement.message_type, MessageType::System);
    assert_eq!(announcement.content, "Acme Corp was added to the group");

    let result = conversations::add_member(&state, group.id, ALICE, CAROL).await;
    assert!(matches!(result, Err(AppError::ConversationsMemberExists)));

    let result = conversations::add_member(&state, group.id, CAROL, 999).await;
    assert!(matches!(result, Err(AppError::UsersNotFound)));
}

#[tokio::test]
async fn deleting_a_conversation_cascades() {
    let (state, _push) = test_state().await;
    seed_student(&state.db, ALICE, "Alice", "Cruz", None, "alice@uni.edu").await;
    seed_coordinator(&state.db, BOB, "Bob", "Reyes", "bob@uni.edu").await;
    seed_company(&state.db, CAROL, "Acme Corp", "hr@acme.com").await;

    let group = conversations::create_group(&state, ALICE, "Interns", &[BOB], None)
        .await
        .unwrap();
    messages::send(&state, group.id, ALICE, "Welcome", None, None).await.unwrap();
    messages::send(&state, group.id, BOB, "Thanks", None, None).await.unwrap();
    chat_service::usecases::read_receipts::mark_as_read(&state, group.id, ALICE)
        .await
        .unwrap();

    let result = conversations::delete(&state, group.id, CAROL).await;
    assert!(matches!(result, Err(AppError::ConversationsUnauthorized)));

    conversations::delete(&state, group.id, ALICE).await.unwrap();

    let conversations_left = count_rows(
        &state.db,
        "SELECT COUNT(*) FROM conversations WHERE id = ?",
        group.id,
    )
    .await;
    let participants_left = count_rows(
        &state.db,
        "SELECT COUNT(*) FROM conversation_participants WHERE conversation_id = ?",
        group.id,
    )
    .await;
    let messages_left = count_rows(
        &state.db,
        "SELECT COUNT(*) FROM messages WHERE conversation_id = ?",
        group.id,
    )
    .await;
    let receipts_left = count_rows(
        &state.db,
        "SELECT COUNT(*) FROM message_read_receipts WHERE message_id IN \
         (SELECT id FROM messages WHERE conversation_id = ?)",
        group.id,
    )
    .await;
    assert_eq!(conversations_left, 0);
    assert_eq!(participants_left, 0);
    assert_eq!(messages_left, 0);
    assert_eq!(receipts_left, 0);

    let result = conversations::fetch_one(&state, group.id, ALICE).await;
    assert!(matches!(result, Err(AppError::ConversationsNotFound)));
}

#[tokio::test]
async fn fetching_a_conversation_requires_membership() {
    let (state, _push) = test_state().await;
    seed_student(&state.db, ALICE, "Alice", "Cruz", None, "alice@uni.edu").await;
    seed_coordinator(&state.db, BOB, "Bob", "Reyes", "bob@uni.edu").await;
    seed_company(&state.db, CAROL, "Acme Corp", "hr@acme.com").await;

    let direct = conversations::create_direct(&state, ALICE, BOB).await.unwrap();
    let result = conversations::fetch_one(&state, direct.id, CAROL).await;
    assert!(matches!(result, Err(AppError::ConversationsUnauthorized)));
}
