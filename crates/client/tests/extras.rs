use chrono::Month;
use serde_json::json;
use starling_client::StarlingAccount;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACCOUNT_UID: &str = "11aa22bb-0000-4000-8000-000000000001";
const CATEGORY_UID: &str = "cccc0000-0000-4000-8000-000000000001";

async fn mount_accounts(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{
                "accountUid": ACCOUNT_UID,
                "defaultCategory": CATEGORY_UID,
                "currency": "GBP",
                "createdAt": "2018-06-01T12:00:00.000Z",
            }]
        })))
        .mount(server)
        .await;
}

async fn build_lazy(server: &MockServer) -> StarlingAccount {
    StarlingAccount::builder()
        .token("test-token")
        .base_url(&server.uri())
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn cards_listing_decodes_flags() {
    let server = MockServer::start().await;
    mount_accounts(&server).await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cards": [{
                "cardUid": "card-1",
                "publicToken": "123456789",
                "enabled": true,
                "posEnabled": true,
                "atmEnabled": false,
                "endOfCardNumber": "5678",
                "currencyFlags": [
                    {"currency": "GBP", "enabled": true},
                    {"currency": "EUR", "enabled": false},
                ],
            }]
        })))
        .mount(&server)
        .await;

    let account = build_lazy(&server).await;
    let cards = account.cards().await.unwrap();

    assert_eq!(cards.len(), 1);
    let card = &cards[0];
    assert_eq!(card.card_uid, "card-1");
    assert!(card.enabled);
    assert!(card.pos_enabled);
    assert!(!card.atm_enabled);
    // Flags the server omitted default to false.
    assert!(!card.gambling_enabled);
    assert_eq!(card.end_of_card_number.as_deref(), Some("5678"));
    assert_eq!(card.currency_flags.len(), 2);
    assert_eq!(card.currency_flags[0].currency, "GBP");
}

#[tokio::test]
async fn payees_listing_includes_nested_accounts() {
    let server = MockServer::start().await;
    mount_accounts(&server).await;
    Mock::given(method("GET"))
        .and(path("/payees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payees": [{
                "payeeUid": "payee-1",
                "payeeName": "Alex Landlord",
                "payeeType": "INDIVIDUAL",
                "firstName": "Alex",
                "lastName": "Landlord",
                "accounts": [{
                    "payeeAccountUid": "pacc-1",
                    "channelType": "BANK_ACCOUNT",
                    "description": "Rent",
                    "defaultAccount": true,
                    "countryCode": "GB",
                    "accountIdentifier": "01234567",
                    "bankIdentifier": "608371",
                    "bankIdentifierType": "SORT_CODE",
                    "lastReferences": ["RENT MARCH"],
                }],
            }]
        })))
        .mount(&server)
        .await;

    let account = build_lazy(&server).await;
    let payees = account.payees().await.unwrap();

    assert_eq!(payees.len(), 1);
    let payee = &payees[0];
    assert_eq!(payee.payee_name, "Alex Landlord");
    assert_eq!(payee.accounts.len(), 1);
    assert!(payee.accounts[0].default_account);
    assert_eq!(payee.accounts[0].last_references, vec!["RENT MARCH"]);
}

#[tokio::test]
async fn direct_debit_listing_and_single_mandate() {
    let server = MockServer::start().await;
    mount_accounts(&server).await;
    let mandate = json!({
        "uid": "mandate-1",
        "reference": "ENERGY-001",
        "status": "LIVE",
        "source": "ELECTRONIC",
        "created": "2024-02-01T09:00:00.000Z",
        "originatorName": "Energy Co",
        "lastPayment": {
            "lastDate": "2026-07-01",
            "lastAmount": {"currency": "GBP", "minorUnits": 8_500},
        },
    });
    Mock::given(method("GET"))
        .and(path("/direct-debit/mandates"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"mandates": [mandate.clone()]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/direct-debit/mandates/mandate-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mandate))
        .mount(&server)
        .await;

    let account = build_lazy(&server).await;

    let mandates = account.direct_debits().await.unwrap();
    assert_eq!(mandates.len(), 1);
    assert_eq!(mandates[0].reference.as_deref(), Some("ENERGY-001"));

    let single = account.direct_debit("mandate-1").await.unwrap();
    assert_eq!(single.uid, "mandate-1");
    let last_payment = single.last_payment.unwrap();
    assert_eq!(last_payment.last_amount.minor_units, 8_500);
}

#[tokio::test]
async fn standing_orders_listing_decodes_recurrence() {
    let server = MockServer::start().await;
    mount_accounts(&server).await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/payments/local/account/{ACCOUNT_UID}/category/{CATEGORY_UID}/standing-orders"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "standingOrders": [{
                "paymentOrderUid": "order-1",
                "amount": {"currency": "GBP", "minorUnits": 90_000},
                "reference": "RENT",
                "payeeUid": "payee-1",
                "payeeAccountUid": "pacc-1",
                "standingOrderRecurrence": {
                    "startDate": "2026-01-01",
                    "frequency": "MONTHLY",
                    "interval": 1,
                },
                "nextDate": "2026-09-01",
                "spendingCategory": "RENT",
            }]
        })))
        .mount(&server)
        .await;

    let account = build_lazy(&server).await;
    let category = account.default_category().unwrap().to_string();
    let orders = account.standing_orders(&category).await.unwrap();

    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.payment_order_uid, "order-1");
    assert_eq!(order.amount.as_ref().unwrap().minor_units, 90_000);
    let recurrence = order.standing_order_recurrence.as_ref().unwrap();
    assert_eq!(recurrence.frequency.as_deref(), Some("MONTHLY"));
    assert_eq!(recurrence.interval, Some(1));
}

#[tokio::test]
async fn spending_insights_query_by_month_and_year() {
    let server = MockServer::start().await;
    mount_accounts(&server).await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/accounts/{ACCOUNT_UID}/spending-insights/spending-category"
        )))
        .and(query_param("month", "JANUARY"))
        .and(query_param("year", "2026"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "period": "2026-01",
            "totalSpent": 1250.50,
            "totalReceived": 2000.0,
            "netSpend": -749.50,
            "breakdown": [{
                "spendingCategory": "GROCERIES",
                "totalSpent": 400.25,
                "totalReceived": 0.0,
                "netSpend": 400.25,
                "netDirection": "OUT",
                "currency": "GBP",
                "percentage": 32.0,
                "transactionCount": 18,
            }],
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/accounts/{ACCOUNT_UID}/spending-insights/counter-party"
        )))
        .and(query_param("month", "JANUARY"))
        .and(query_param("year", "2026"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "breakdown": [{
                "counterPartyName": "Corner Shop",
                "counterPartyType": "MERCHANT",
                "totalSpent": 120.0,
                "transactionCount": 6,
            }],
        })))
        .mount(&server)
        .await;

    let account = build_lazy(&server).await;

    let by_category = account
        .spending_by_category(2026, Month::January)
        .await
        .unwrap();
    assert_eq!(by_category.period.as_deref(), Some("2026-01"));
    assert_eq!(by_category.breakdown.len(), 1);
    assert_eq!(by_category.breakdown[0].spending_category, "GROCERIES");
    assert_eq!(by_category.breakdown[0].transaction_count, 18);

    let by_party = account
        .spending_by_counter_party(2026, Month::January)
        .await
        .unwrap();
    assert_eq!(by_party.breakdown.len(), 1);
    assert_eq!(by_party.breakdown[0].counter_party_name, "Corner Shop");
}

#[tokio::test]
async fn round_up_status_with_and_without_details() {
    let server = MockServer::start().await;
    mount_accounts(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/feed/account/{ACCOUNT_UID}/round-up")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"active": false})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/feed/account/{ACCOUNT_UID}/round-up")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "active": true,
            "roundUpGoalDetails": {
                "primaryCategoryUid": CATEGORY_UID,
                "roundUpGoalUid": "goal-1",
                "roundUpMultiplier": 2,
                "activatedAt": "2026-03-01T08:00:00.000Z",
                "activatedBy": "user-1",
            },
        })))
        .mount(&server)
        .await;

    let account = build_lazy(&server).await;

    let inactive = account.round_up().await.unwrap();
    assert!(!inactive.active);
    assert!(inactive.round_up_goal_details.is_none());

    let active = account.round_up().await.unwrap();
    assert!(active.active);
    let details = active.round_up_goal_details.unwrap();
    assert_eq!(details.round_up_multiplier, Some(2));
    assert_eq!(details.round_up_goal_uid.as_deref(), Some("goal-1"));
}
