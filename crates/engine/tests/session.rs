use engine::{
    ExpenseCategory, LevelPolicy, MemoryStore, Money, Rules, Session, persist,
};

async fn onboarded_session(store: MemoryStore) -> Session {
    let mut session = Session::builder().store(store).build().await;
    session
        .complete_onboarding(Money::new(850_000), Money::new(20_000))
        .unwrap();
    session
}

#[tokio::test]
async fn a_day_of_spending() {
    let store = MemoryStore::new();
    let mut session = onboarded_session(store.clone()).await;

    session
        .log_expense(Money::new(4500), "groceries", ExpenseCategory::Necessary)
        .unwrap();
    session
        .log_expense(Money::new(3000), "snack", ExpenseCategory::Want)
        .unwrap();
    let outcome = session
        .log_expense(Money::new(10_000), "index fund", ExpenseCategory::Investment)
        .unwrap();

    assert_eq!(outcome.xp_delta, 10);
    assert_eq!(outcome.honesty_bonus, 0);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.total_spent, Money::new(17_500));
    // +20, then -20 +10, then +10.
    assert_eq!(snapshot.xp, 20);
    assert_eq!(snapshot.level.index, 1);
    assert_eq!(snapshot.level.xp_to_next_level, 80);
    assert!((snapshot.budget.percent_raw - 87.5).abs() < 1e-9);
    assert_eq!(snapshot.budget.remaining, Money::new(2500));
    assert_eq!(
        snapshot.last_expense.unwrap().description,
        "index fund"
    );

    session.shutdown().await;

    // The store now holds the exact same state a fresh adapter reads back.
    let persisted = persist::load(&store).await.unwrap();
    assert_eq!(persisted.totals.total_spent, Money::new(17_500));
    assert_eq!(persisted.totals.xp, 20);
}

#[tokio::test]
async fn restart_reads_the_same_state() {
    let store = MemoryStore::new();
    let mut session = onboarded_session(store.clone()).await;
    session
        .log_expense(Money::new(2000), "bus pass", ExpenseCategory::Necessary)
        .unwrap();
    session.shutdown().await;

    let session = Session::builder().store(store).build().await;

    assert!(session.is_onboarded());
    let configuration = session.configuration().unwrap();
    assert_eq!(configuration.monthly_income(), Money::new(850_000));
    assert_eq!(configuration.daily_budget(), Money::new(20_000));
    assert_eq!(session.totals().total_spent, Money::new(2000));
    assert_eq!(session.totals().xp, 20);
}

#[tokio::test]
async fn overspending_never_blocks_logging() {
    let store = MemoryStore::new();
    let mut session = onboarded_session(store).await;

    for _ in 0..5 {
        session
            .log_expense(Money::new(9000), "gadgets", ExpenseCategory::Want)
            .unwrap();
    }

    let snapshot = session.snapshot();
    assert_eq!(snapshot.total_spent, Money::new(45_000));
    assert!(snapshot.budget.percent_raw > 100.0);
    assert_eq!(snapshot.budget.percent_clamped, 100.0);
    assert_eq!(snapshot.budget.remaining, Money::ZERO);
    session.shutdown().await;
}

#[tokio::test]
async fn bounded_tiers_follow_the_table() {
    let rules = Rules {
        level_policy: LevelPolicy::bounded_tiers(),
        ..Rules::default()
    };
    let mut session = Session::builder()
        .store(MemoryStore::new())
        .rules(rules)
        .build()
        .await;
    session
        .complete_onboarding(Money::new(850_000), Money::new(20_000))
        .unwrap();

    for _ in 0..6 {
        session
            .log_expense(Money::new(100), "groceries", ExpenseCategory::Necessary)
            .unwrap();
    }

    let level = session.snapshot().level;
    assert_eq!(session.totals().xp, 120);
    assert_eq!(level.name, "Bronze");
    assert_eq!(level.index, 2);
    session.shutdown().await;
}
