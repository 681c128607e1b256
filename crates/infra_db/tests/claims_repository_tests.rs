//! Integration tests for the claims repository on in-memory SQLite

use chrono::NaiveDate;

use core_kernel::{Amount, ClaimId, DateRange};
use domain_claims::{ClaimFilter, ClaimSearch, ClaimStatus, ClaimType, MainClaimSearch};
use infra_db::DatabaseError;
use test_utils::{db_test, test_database, ClaimFixtures};

db_test!(test_create_assigns_id_and_timestamps, |repo| {
    let claim = repo.create(&ClaimFixtures::main_claim()).await.unwrap();

    assert!(claim.id.get() > 0);
    assert_eq!(claim.created_at, claim.updated_at);
    assert_eq!(claim.customer_name, "A. Singh");
    assert_eq!(claim.claim_type, ClaimType::Cashless);

    let fetched = repo.get_by_id(claim.id).await.unwrap();
    assert_eq!(fetched, claim);
});

db_test!(test_amounts_survive_storage, |repo| {
    let created = repo.create(&ClaimFixtures::other_main_claim()).await.unwrap();
    let fetched = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.claimed_amount, Some(Amount::parse("120000").unwrap()));
    assert_eq!(fetched.approved_amount, Some(Amount::parse("100000").unwrap()));
});

db_test!(test_missing_claim, |repo| {
    assert!(repo.find_by_id(ClaimId::new(404)).await.unwrap().is_none());
    assert!(repo.get_by_id(ClaimId::new(404)).await.unwrap_err().is_not_found());
});

db_test!(test_update_replaces_fields, |repo| {
    let claim = repo.create(&ClaimFixtures::main_claim()).await.unwrap();

    let mut details = ClaimFixtures::main_claim();
    details.claim_status = ClaimStatus::Settled;
    details.claim_number = Some("CLM-1".to_string());
    details.tpa_name = Some("MediAssist".to_string());

    let updated = repo.update(claim.id, &details).await.unwrap();
    assert_eq!(updated.id, claim.id);
    assert_eq!(updated.claim_status, ClaimStatus::Settled);
    assert_eq!(updated.tpa_name.as_deref(), Some("MediAssist"));
    assert_eq!(updated.created_at, claim.created_at);
    assert!(updated.updated_at >= claim.updated_at);
});

db_test!(test_update_missing_claim, |repo| {
    let result = repo.update(ClaimId::new(99), &ClaimFixtures::main_claim()).await;
    assert!(matches!(result, Err(DatabaseError::NotFound(_))));
});

db_test!(test_unknown_parent_is_foreign_key_violation, |repo| {
    let result = repo.create(&ClaimFixtures::linked_claim(ClaimId::new(55))).await;
    assert!(matches!(result, Err(DatabaseError::ForeignKeyViolation(_))));
});

db_test!(test_search_filters_and_ordering, |repo| {
    let first = repo.create(&ClaimFixtures::main_claim()).await.unwrap();
    let second = repo.create(&ClaimFixtures::other_main_claim()).await.unwrap();
    let standalone = repo.create(&ClaimFixtures::standalone_claim()).await.unwrap();

    let all = repo.list_all().await.unwrap();
    let ids: Vec<ClaimId> = all.iter().map(|c| c.id).collect();
    // entry dates: 2024-03-02, 2024-02-10, 2024-01-10
    assert_eq!(ids, vec![second.id, standalone.id, first.id]);

    let by_name = ClaimSearch {
        customer_name: Some("priya".to_string()),
        ..Default::default()
    }
    .into_filter()
    .unwrap();
    let found = repo.search(&by_name).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, second.id);

    let by_entry = ClaimFilter {
        entry_dates: DateRange::new(
            NaiveDate::from_ymd_opt(2024, 2, 1),
            NaiveDate::from_ymd_opt(2024, 2, 28),
        )
        .unwrap(),
        ..Default::default()
    };
    let found = repo.search(&by_entry).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, standalone.id);

    let by_type = ClaimFilter {
        claim_type: Some(ClaimType::Reimbursement),
        ..Default::default()
    };
    assert_eq!(repo.search(&by_type).await.unwrap().len(), 1);
});

db_test!(test_text_search_treats_wildcards_literally, |repo| {
    let mut underscored = ClaimFixtures::main_claim();
    underscored.policy_number = "A_1".to_string();
    let underscored = repo.create(&underscored).await.unwrap();

    let mut plain = ClaimFixtures::main_claim();
    plain.policy_number = "AB1".to_string();
    repo.create(&plain).await.unwrap();

    let by_policy = ClaimFilter {
        policy_number: Some("A_1".to_string()),
        ..Default::default()
    };
    let found = repo.search(&by_policy).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, underscored.id);
    assert!(found.iter().all(|claim| by_policy.matches(claim)));

    let by_percent = ClaimFilter {
        customer_name: Some("%".to_string()),
        ..Default::default()
    };
    assert!(repo.search(&by_percent).await.unwrap().is_empty());

    let main_by_policy = MainClaimSearch {
        policy_number: Some("a_1".to_string()),
        ..Default::default()
    }
    .into_filter()
    .unwrap();
    assert_eq!(repo.main_claims(&main_by_policy).await.unwrap().len(), 1);
});

db_test!(test_main_claims_only_offer_main_types, |repo| {
    let main = repo.create(&ClaimFixtures::main_claim()).await.unwrap();
    repo.create(&ClaimFixtures::standalone_claim()).await.unwrap();
    repo.create(&ClaimFixtures::linked_claim(main.id)).await.unwrap();

    let filter = MainClaimSearch::default().into_filter().unwrap();
    let mains = repo.main_claims(&filter).await.unwrap();
    assert_eq!(mains.len(), 1);
    assert_eq!(mains[0].id, main.id);

    let filter = MainClaimSearch {
        policy_number: Some("nope".to_string()),
        ..Default::default()
    }
    .into_filter()
    .unwrap();
    assert!(repo.main_claims(&filter).await.unwrap().is_empty());
});

db_test!(test_linked_claims_and_count, |repo| {
    let parent = repo.create(&ClaimFixtures::main_claim()).await.unwrap();
    let child = repo.create(&ClaimFixtures::linked_claim(parent.id)).await.unwrap();

    let linked = repo.linked_claims(parent.id).await.unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, child.id);
    assert_eq!(linked[0].parent_claim_id, Some(parent.id));
    assert_eq!(repo.count_linked(parent.id).await.unwrap(), 1);
    assert_eq!(repo.count_linked(child.id).await.unwrap(), 0);
});

db_test!(test_delete_cascades_to_linked_claims, |repo| {
    let parent = repo.create(&ClaimFixtures::main_claim()).await.unwrap();
    let other = repo.create(&ClaimFixtures::other_main_claim()).await.unwrap();
    repo.create(&ClaimFixtures::linked_claim(parent.id)).await.unwrap();
    repo.create(&ClaimFixtures::linked_claim(parent.id)).await.unwrap();
    let kept_child = repo.create(&ClaimFixtures::linked_claim(other.id)).await.unwrap();

    assert_eq!(repo.delete_cascade(parent.id).await.unwrap(), 2);

    let remaining: Vec<ClaimId> = repo.list_all().await.unwrap().iter().map(|c| c.id).collect();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.contains(&other.id));
    assert!(remaining.contains(&kept_child.id));
});

db_test!(test_delete_missing_claim, |repo| {
    let result = repo.delete_cascade(ClaimId::new(8)).await;
    assert!(matches!(result, Err(DatabaseError::NotFound(_))));
});

db_test!(test_statistics, |repo| {
    let empty = repo.statistics().await.unwrap();
    assert_eq!(empty.total_claims, 0);
    assert!(empty.total_claimed.is_zero());

    let parent = repo.create(&ClaimFixtures::main_claim()).await.unwrap();
    repo.create(&ClaimFixtures::other_main_claim()).await.unwrap();
    repo.create(&ClaimFixtures::linked_claim(parent.id)).await.unwrap();

    let stats = repo.statistics().await.unwrap();
    assert_eq!(stats.total_claims, 3);
    assert_eq!(stats.by_status.get("Intimation"), Some(&3));
    assert_eq!(stats.by_company.get("HDFC"), Some(&2));
    assert_eq!(stats.by_company.get("NIVA"), Some(&1));
    assert_eq!(stats.total_claimed, Amount::parse("122500").unwrap());
    assert_eq!(stats.total_approved, Amount::parse("100000").unwrap());
});

#[tokio::test]
async fn test_clear_data_keeps_schema() {
    let db = test_database().await;
    let repo = db.repository();
    let parent = repo.create(&ClaimFixtures::main_claim()).await.unwrap();
    repo.create(&ClaimFixtures::linked_claim(parent.id)).await.unwrap();

    db.clear_data().await.unwrap();
    assert!(repo.list_all().await.unwrap().is_empty());
    repo.create(&ClaimFixtures::main_claim()).await.unwrap();
}
