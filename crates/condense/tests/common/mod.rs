use chrono::NaiveDate;
use condense_model::{Column, ColumnType, Dataset, Value};

/// 100-row sales table: two number columns, one categorical, one date.
/// `amount` carries four nulls so the missing-value pass always runs.
pub fn sales_dataset() -> Dataset {
    let cities = ["Lyon", "Paris", "Marseille"];
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let amount = (0..100)
        .map(|i| {
            if i % 25 == 24 {
                None
            } else {
                Some(Value::Float(10.0 + (i as f64 * 3.7) % 90.0))
            }
        })
        .collect();
    let quantity = (0..100)
        .map(|i| Some(Value::Int(1 + (i % 10) as i64)))
        .collect();
    let city = (0..100)
        .map(|i| Some(Value::Text(cities[i % 3].to_string())))
        .collect();
    let day = (0..100)
        .map(|i| Some(Value::Date(start + chrono::Duration::days(i))))
        .collect();

    Dataset::new(vec![
        Column::new("amount", ColumnType::Float64, amount),
        Column::new("quantity", ColumnType::Int64, quantity),
        Column::new("city", ColumnType::Text, city),
        Column::new("day", ColumnType::Date, day),
    ])
    .expect("valid fixture")
}
