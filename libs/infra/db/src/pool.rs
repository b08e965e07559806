//! Pool construction: parses a `schema` query parameter off
//! `DATABASE_URL`, if present, and turns it into a `SET search_path`
//! directive run on every pooled connection via sqlx's
//! `after_connect` hook.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::errors::DbError;

/// Splits `schema=<name>` out of the URL's query string, if present,
/// returning the stripped URL and the schema name.
fn split_schema_param(database_url: &str) -> (String, Option<String>) {
    let Some((base, query)) = database_url.split_once('?') else {
        return (database_url.to_string(), None);
    };

    let mut schema = None;
    let mut remaining = Vec::new();
    for pair in query.split('&') {
        match pair.split_once('=') {
            Some(("schema", value)) => schema = Some(value.to_string()),
            _ => remaining.push(pair),
        }
    }

    let rebuilt = if remaining.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{}", remaining.join("&"))
    };
    (rebuilt, schema)
}

pub async fn connect(
    database_url: &str,
    min_connections: u32,
    max_connections: u32,
    connect_timeout: Duration,
) -> Result<PgPool, DbError> {
    if min_connections > max_connections {
        return Err(DbError::Configuration(format!(
            "DB_POOL_MIN ({min_connections}) exceeds DB_POOL_MAX ({max_connections})"
        )));
    }

    let (connect_url, schema) = split_schema_param(database_url);

    let mut options = PgPoolOptions::new()
        .min_connections(min_connections)
        .max_connections(max_connections)
        .acquire_timeout(connect_timeout);

    if let Some(schema) = schema {
        options = options.after_connect(move |conn, _meta| {
            let schema = schema.clone();
            Box::pin(async move {
                sqlx::query(&format!("SET search_path = \"{schema}\""))
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        });
    }

    options
        .connect(&connect_url)
        .await
        .map_err(|e| DbError::Connection(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_schema_param_leaving_the_rest() {
        let (url, schema) = split_schema_param("postgres://u:p@host/db?schema=tenant_a&sslmode=require");
        assert_eq!(url, "postgres://u:p@host/db?sslmode=require");
        assert_eq!(schema.as_deref(), Some("tenant_a"));
    }

    #[test]
    fn url_without_schema_param_is_untouched() {
        let (url, schema) = split_schema_param("postgres://u:p@host/db");
        assert_eq!(url, "postgres://u:p@host/db");
        assert_eq!(schema, None);
    }

    #[test]
    fn schema_as_only_query_param_leaves_no_trailing_question_mark() {
        let (url, schema) = split_schema_param("postgres://u:p@host/db?schema=tenant_a");
        assert_eq!(url, "postgres://u:p@host/db");
        assert_eq!(schema.as_deref(), Some("tenant_a"));
    }
}
