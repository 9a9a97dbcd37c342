//! Integration tests for the repository layer against a real database:
//! - Create then read returns every field unchanged
//! - Update overwrites and reports missing rows
//! - Delete removes rows and reports missing rows
//! - Unique and foreign key constraint violations

use chrono::NaiveDate;
use residence_db::filter::ListFilter;
use residence_db::models::asset::CreateAsset;
use residence_db::models::asset_category::CreateAssetCategory;
use residence_db::models::contract::CreateContract;
use residence_db::models::emergency::{CreateEmergencyReport, UpdateEmergencyReport};
use residence_db::models::maintenance_history::CreateMaintenanceRecord;
use residence_db::models::maintenance_plan::CreateMaintenancePlan;
use residence_db::models::reception::CreateReception;
use residence_db::models::rule::CreateResidenceRule;
use residence_db::models::user::{CreateUser, UpdateUser};
use residence_db::models::vendor::CreateVendor;
use residence_db::models::visitor::CreateVisitor;
use residence_db::repositories::{
    AssetCategoryRepo, AssetRepo, ContractRepo, EmergencyRepo, MaintenanceHistoryRepo,
    MaintenancePlanRepo, ReceptionRepo, ResidenceRuleRepo, UserRepo, VendorRepo, VisitorRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        role: "resident".to_string(),
        phone: Some("555-0100".to_string()),
    }
}

fn new_vendor(name: &str) -> CreateVendor {
    CreateVendor {
        name: name.to_string(),
        email: "a@x.com".to_string(),
        phone: "555".to_string(),
        address: "1 Main St".to_string(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_asset(pool: &PgPool) -> i64 {
    let category = AssetCategoryRepo::create(
        pool,
        &CreateAssetCategory {
            name: "Plumbing".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    AssetRepo::create(
        pool,
        &CreateAsset {
            name: "Water pump".to_string(),
            category_id: category.id,
            location: "Basement".to_string(),
            purchase_date: None,
            value: None,
            status: "in_use".to_string(),
            description: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn is_constraint_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db) => db.constraint() == Some(constraint),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Test: Vendor create / read / update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_vendor_lifecycle(pool: PgPool) {
    let created = VendorRepo::create(&pool, &new_vendor("Acme")).await.unwrap();
    assert_eq!(created.name, "Acme");

    let fetched = VendorRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("vendor should exist");
    assert_eq!(fetched.name, "Acme");
    assert_eq!(fetched.email, "a@x.com");
    assert_eq!(fetched.phone, "555");
    assert_eq!(fetched.address, "1 Main St");

    let mut changes = new_vendor("Acme Holdings");
    changes.address = "2 Side St".to_string();
    let updated = VendorRepo::update(&pool, created.id, &changes)
        .await
        .unwrap()
        .expect("update should hit the row");
    assert_eq!(updated.name, "Acme Holdings");
    assert_eq!(updated.address, "2 Side St");

    assert!(VendorRepo::delete(&pool, created.id).await.unwrap());
    assert!(VendorRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_and_delete_report_missing_rows(pool: PgPool) {
    let missing = VendorRepo::update(&pool, 9999, &new_vendor("Ghost"))
        .await
        .unwrap();
    assert!(missing.is_none());
    assert!(!VendorRepo::delete(&pool, 9999).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_user_email_rejected(pool: PgPool) {
    UserRepo::create(&pool, &new_user("dup@example.com"))
        .await
        .unwrap();
    let err = UserRepo::create(&pool, &new_user("dup@example.com"))
        .await
        .unwrap_err();
    assert!(is_constraint_violation(&err, "uq_users_email"));

    let total = UserRepo::count(&pool, &ListFilter::search(None)).await.unwrap();
    assert_eq!(total, 1, "the duplicate must not be inserted");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_user_by_email_ignores_case(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("mixed@example.com"))
        .await
        .unwrap();
    let found = UserRepo::find_by_email(&pool, "MIXED@Example.com")
        .await
        .unwrap()
        .expect("lookup should be case-insensitive");
    assert_eq!(found.id, user.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_user_keeps_password(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("keep@example.com"))
        .await
        .unwrap();
    let updated = UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            name: "Renamed".to_string(),
            email: "keep@example.com".to_string(),
            role: "admin".to_string(),
            phone: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.role, "admin");
    assert_eq!(updated.phone, None);
    assert_eq!(updated.password_hash, user.password_hash);
}

// ---------------------------------------------------------------------------
// Test: Foreign keys
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_asset_requires_existing_category(pool: PgPool) {
    let input = CreateAsset {
        name: "Boiler".to_string(),
        category_id: 4242,
        location: "Basement".to_string(),
        purchase_date: None,
        value: None,
        status: "in_use".to_string(),
        description: None,
    };
    let err = AssetRepo::create(&pool, &input).await.unwrap_err();
    assert!(is_constraint_violation(&err, "fk_assets_category_id"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_category_with_assets_cannot_be_deleted(pool: PgPool) {
    let category = AssetCategoryRepo::create(
        &pool,
        &CreateAssetCategory {
            name: "HVAC".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    let asset = AssetRepo::create(
        &pool,
        &CreateAsset {
            name: "Boiler".to_string(),
            category_id: category.id,
            location: "Basement".to_string(),
            purchase_date: Some(date(2023, 3, 1)),
            value: Some(12500.0),
            status: "in_use".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(asset.purchase_date, Some(date(2023, 3, 1)));
    assert_eq!(asset.value, Some(12500.0));

    let listed = AssetRepo::list_by_category(&pool, category.id).await.unwrap();
    assert_eq!(listed.len(), 1);

    assert!(AssetCategoryRepo::delete(&pool, category.id).await.is_err());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_contracts_listed_by_vendor(pool: PgPool) {
    let vendor = VendorRepo::create(&pool, &new_vendor("Acme")).await.unwrap();
    let other = VendorRepo::create(&pool, &new_vendor("Other")).await.unwrap();

    for (vendor_id, title) in [(vendor.id, "Cleaning"), (vendor.id, "Security"), (other.id, "Lifts")] {
        ContractRepo::create(
            &pool,
            &CreateContract {
                vendor_id,
                title: title.to_string(),
                start_date: date(2024, 1, 1),
                end_date: date(2024, 12, 31),
                value: None,
                status: "active".to_string(),
                notes: None,
            },
        )
        .await
        .unwrap();
    }

    let contracts = ContractRepo::list_by_vendor(&pool, vendor.id).await.unwrap();
    let titles: Vec<_> = contracts.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Cleaning", "Security"]);
}

// ---------------------------------------------------------------------------
// Test: Status-driven columns
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_emergency_resolution_timestamp(pool: PgPool) {
    let reporter = UserRepo::create(&pool, &new_user("reporter@example.com"))
        .await
        .unwrap();
    let report = EmergencyRepo::create(
        &pool,
        &CreateEmergencyReport {
            title: "Burst pipe".to_string(),
            description: "Water in the hallway".to_string(),
            location: "Floor 3".to_string(),
            priority: None,
        },
        "high",
        reporter.id,
    )
    .await
    .unwrap();
    assert_eq!(report.status, "reported");
    assert_eq!(report.reported_by, Some(reporter.id));
    assert!(report.resolved_at.is_none());

    let mut changes = UpdateEmergencyReport {
        title: report.title.clone(),
        description: report.description.clone(),
        location: report.location.clone(),
        priority: "high".to_string(),
        status: "resolved".to_string(),
    };
    let resolved = EmergencyRepo::update(&pool, report.id, &changes)
        .await
        .unwrap()
        .unwrap();
    assert!(resolved.resolved_at.is_some());

    changes.status = "in_progress".to_string();
    let reopened = EmergencyRepo::update(&pool, report.id, &changes)
        .await
        .unwrap()
        .unwrap();
    assert!(reopened.resolved_at.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reception_check_out_only_once(pool: PgPool) {
    let resident = UserRepo::create(&pool, &new_user("host@example.com"))
        .await
        .unwrap();
    let entry = ReceptionRepo::create(
        &pool,
        &CreateReception {
            resident_id: resident.id,
            guest_name: "Grandma".to_string(),
            guest_phone: None,
            purpose: Some("Visit".to_string()),
            check_in_at: None,
            check_out_at: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    assert!(entry.check_out_at.is_none());

    let checked_out = ReceptionRepo::check_out(&pool, entry.id)
        .await
        .unwrap()
        .expect("first check-out succeeds");
    assert!(checked_out.check_out_at.is_some());

    let again = ReceptionRepo::check_out(&pool, entry.id).await.unwrap();
    assert!(again.is_none(), "second check-out must be rejected");
}

// ---------------------------------------------------------------------------
// Test: Maintenance plans and history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_maintenance_plan_lifecycle(pool: PgPool) {
    let asset_id = seed_asset(&pool).await;
    let vendor = VendorRepo::create(&pool, &new_vendor("PumpCo")).await.unwrap();

    let mut input = CreateMaintenancePlan {
        asset_id,
        vendor_id: Some(vendor.id),
        title: "Quarterly pump service".to_string(),
        description: Some("Replace seals".to_string()),
        frequency: "quarterly".to_string(),
        next_due_date: date(2024, 9, 1),
        status: "scheduled".to_string(),
    };
    let plan = MaintenancePlanRepo::create(&pool, &input).await.unwrap();

    let fetched = MaintenancePlanRepo::find_by_id(&pool, plan.id)
        .await
        .unwrap()
        .expect("plan should exist");
    assert_eq!(fetched.asset_id, asset_id);
    assert_eq!(fetched.vendor_id, Some(vendor.id));
    assert_eq!(fetched.frequency, "quarterly");
    assert_eq!(fetched.next_due_date, date(2024, 9, 1));

    let found = MaintenancePlanRepo::list(&pool, &ListFilter::search(Some("PUMP SERVICE")))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    input.status = "completed".to_string();
    input.vendor_id = None;
    let updated = MaintenancePlanRepo::update(&pool, plan.id, &input)
        .await
        .unwrap()
        .expect("update should hit the row");
    assert_eq!(updated.status, "completed");
    assert_eq!(updated.vendor_id, None);

    assert!(MaintenancePlanRepo::delete(&pool, plan.id).await.unwrap());
    assert!(MaintenancePlanRepo::find_by_id(&pool, plan.id)
        .await
        .unwrap()
        .is_none());
    assert!(!MaintenancePlanRepo::delete(&pool, plan.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_plan_keeps_history_unlinked(pool: PgPool) {
    let asset_id = seed_asset(&pool).await;
    let plan = MaintenancePlanRepo::create(
        &pool,
        &CreateMaintenancePlan {
            asset_id,
            vendor_id: None,
            title: "Monthly check".to_string(),
            description: None,
            frequency: "monthly".to_string(),
            next_due_date: date(2024, 7, 1),
            status: "scheduled".to_string(),
        },
    )
    .await
    .unwrap();

    let mut input = CreateMaintenanceRecord {
        asset_id,
        plan_id: Some(plan.id),
        performed_on: date(2024, 6, 1),
        description: "Checked pressure".to_string(),
        cost: Some(80.0),
        performed_by: Some("Bob".to_string()),
    };
    let record = MaintenanceHistoryRepo::create(&pool, &input).await.unwrap();
    assert_eq!(record.plan_id, Some(plan.id));
    assert_eq!(record.cost, Some(80.0));

    input.cost = Some(95.5);
    let updated = MaintenanceHistoryRepo::update(&pool, record.id, &input)
        .await
        .unwrap()
        .expect("update should hit the row");
    assert_eq!(updated.cost, Some(95.5));

    let by_bob = MaintenanceHistoryRepo::list(&pool, &ListFilter::search(Some("bob")))
        .await
        .unwrap();
    assert_eq!(by_bob.len(), 1);

    assert!(MaintenancePlanRepo::delete(&pool, plan.id).await.unwrap());
    let kept = MaintenanceHistoryRepo::find_by_id(&pool, record.id)
        .await
        .unwrap()
        .expect("history survives its plan");
    assert_eq!(kept.plan_id, None);

    let for_asset = MaintenanceHistoryRepo::list_by_asset(&pool, asset_id).await.unwrap();
    assert_eq!(for_asset.len(), 1);

    assert!(MaintenanceHistoryRepo::delete(&pool, record.id).await.unwrap());
    assert!(!MaintenanceHistoryRepo::delete(&pool, record.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_asset_removes_its_maintenance(pool: PgPool) {
    let asset_id = seed_asset(&pool).await;
    let record = MaintenanceHistoryRepo::create(
        &pool,
        &CreateMaintenanceRecord {
            asset_id,
            plan_id: None,
            performed_on: date(2024, 6, 1),
            description: "Replaced impeller".to_string(),
            cost: None,
            performed_by: None,
        },
    )
    .await
    .unwrap();

    assert!(AssetRepo::delete(&pool, asset_id).await.unwrap());
    assert!(MaintenanceHistoryRepo::find_by_id(&pool, record.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: Visitors and residence rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_visitor_lifecycle(pool: PgPool) {
    let mut input = CreateVisitor {
        name: "Jane Roe".to_string(),
        phone: Some("555-0199".to_string()),
        id_number: Some("X123".to_string()),
        room_id: None,
        visit_date: date(2024, 5, 20),
        purpose: Some("Delivery".to_string()),
    };
    let visitor = VisitorRepo::create(&pool, &input).await.unwrap();
    assert_eq!(visitor.visit_date, date(2024, 5, 20));

    let found = VisitorRepo::list(&pool, &ListFilter::search(Some("x12")))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    input.purpose = Some("Maintenance".to_string());
    let updated = VisitorRepo::update(&pool, visitor.id, &input)
        .await
        .unwrap()
        .expect("update should hit the row");
    assert_eq!(updated.purpose.as_deref(), Some("Maintenance"));

    assert!(VisitorRepo::delete(&pool, visitor.id).await.unwrap());
    assert!(VisitorRepo::find_by_id(&pool, visitor.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_visitor_requires_existing_room(pool: PgPool) {
    let input = CreateVisitor {
        name: "Jane Roe".to_string(),
        phone: None,
        id_number: None,
        room_id: Some(4242),
        visit_date: date(2024, 5, 20),
        purpose: None,
    };
    let err = VisitorRepo::create(&pool, &input).await.unwrap_err();
    assert!(is_constraint_violation(&err, "fk_visitors_room_id"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rule_lifecycle(pool: PgPool) {
    let mut input = CreateResidenceRule {
        title: "Quiet hours".to_string(),
        content: "No noise after 22:00".to_string(),
        category: Some("Noise".to_string()),
        effective_date: Some(date(2024, 1, 1)),
    };
    let rule = ResidenceRuleRepo::create(&pool, &input).await.unwrap();

    let found = ResidenceRuleRepo::list(&pool, &ListFilter::search(Some("QUIET")))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, rule.id);

    input.content = "No noise after 23:00".to_string();
    let updated = ResidenceRuleRepo::update(&pool, rule.id, &input)
        .await
        .unwrap()
        .expect("update should hit the row");
    assert_eq!(updated.content, "No noise after 23:00");
    assert_eq!(updated.effective_date, Some(date(2024, 1, 1)));

    assert!(ResidenceRuleRepo::delete(&pool, rule.id).await.unwrap());
    assert!(ResidenceRuleRepo::find_by_id(&pool, rule.id).await.unwrap().is_none());
}
