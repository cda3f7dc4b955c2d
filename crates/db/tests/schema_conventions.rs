use sqlx::PgPool;

const ENTITY_TABLES: [&str; 5] = [
    "vibes",
    "occasions",
    "difficulties",
    "alcohol_levels",
    "cocktails",
];

/// Entity ids are external string keys, never generated integers.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_entity_pks_are_text(pool: PgPool) {
    vibesip_db::health_check(&pool).await.unwrap();

    for table in ENTITY_TABLES {
        let (data_type, default): (String, Option<String>) = sqlx::query_as(
            "SELECT data_type, column_default
             FROM information_schema.columns
             WHERE table_schema = 'public'
               AND table_name = $1
               AND column_name = 'id'",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap_or_else(|e| panic!("{table}.id lookup failed: {e}"));

        assert_eq!(data_type, "text", "Table {table}.id should be text");
        assert!(default.is_none(), "Table {table}.id must not have a default");
    }
}

/// Junction tables use composite primary keys over both foreign keys.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_junction_tables_have_composite_pks(pool: PgPool) {
    for (table, other) in [
        ("cocktail_vibes", "vibe_id"),
        ("cocktail_occasions", "occasion_id"),
    ] {
        let columns: Vec<(String,)> = sqlx::query_as(
            "SELECT kcu.column_name
             FROM information_schema.table_constraints tc
             JOIN information_schema.key_column_usage kcu
               ON kcu.constraint_name = tc.constraint_name
              AND kcu.table_name = tc.table_name
             WHERE tc.table_name = $1
               AND tc.constraint_type = 'PRIMARY KEY'
             ORDER BY kcu.ordinal_position",
        )
        .bind(table)
        .fetch_all(&pool)
        .await
        .unwrap();

        let columns: Vec<String> = columns.into_iter().map(|(c,)| c).collect();
        assert_eq!(columns, vec!["cocktail_id".to_string(), other.to_string()]);
    }
}

/// Cocktails must reference an existing difficulty and alcohol level.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cocktail_references_are_enforced(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO cocktails (id, name, description, ingredients, steps, difficulty_id, alcohol_level_id)
         VALUES ('c', 'C', 'C.', '[]', '[]', 'difficulty-none', 'alcohol-none')",
    )
    .execute(&pool)
    .await;

    let err = result.expect_err("insert with dangling references should fail");
    let db_err = err.as_database_error().expect("expected a database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}
