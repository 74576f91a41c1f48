//! End-to-end: statement CSV -> loader -> aggregations -> page payloads.

use svodka_ingest::read_operations;
use svodka_reports::{
    build_events_page, build_main_page, build_spending_report, profitable_cashback_categories,
    spending_by_category,
};

const STATEMENT: &str = "\
Дата операции,Номер карты,Статус,Сумма операции,Валюта операции,Сумма платежа,Валюта платежа,Категория,Описание
05.03.2023 18:00:00,*7197,OK,-100.00,RUB,-100.00,RUB,Переводы,Перевод другу
10.03.2023 16:45:00,*7197,OK,-300.00,RUB,-300.00,RUB,Техника,Наушники
15.03.2023 10:15:00,*7197,OK,-120.00,RUB,-120.00,RUB,Еда,Кафе
20.03.2023 14:00:00,*7197,OK,-250.00,RUB,-250.00,RUB,Еда,Ресторан
25.03.2023 12:30:00,*7197,OK,-500.00,RUB,-500.00,RUB,Техника,Гаджеты
02.04.2023 09:10:00,*7197,OK,-80.00,RUB,-80.00,RUB,Еда,Пекарня
14.04.2023 20:05:00,*7197,FAILED,-999.00,RUB,-999.00,RUB,Еда,Отклонено
03.05.2023 11:00:00,*7197,OK,50000.00,RUB,50000.00,RUB,Пополнения,Зарплата
";

#[test]
fn test_cashback_ranking_from_statement() {
    let txns = read_operations(STATEMENT.as_bytes()).unwrap();
    assert_eq!(txns.len(), 8);

    let ranking = profitable_cashback_categories(&txns, "2023", "03");
    assert_eq!(ranking["Еда"], 3.7);
    assert_eq!(ranking["Техника"], 8.0);
    assert_eq!(ranking["Переводы"], 1.0);
}

#[test]
fn test_trailing_window_report_from_statement() {
    let txns = read_operations(STATEMENT.as_bytes()).unwrap();

    let periods = spending_by_category(&txns, "Еда", Some("2023.05.15"));
    assert_eq!(periods.len(), 2);
    // March: -120 - 250; April: -80 - 999 (status does not gate spend)
    assert_eq!(periods[0].total, -370.0);
    assert_eq!(periods[1].total, -1079.0);

    let report = build_spending_report(&txns, "Еда", Some("2023.05.15"));
    assert_eq!(report.periods, periods);
}

#[test]
fn test_main_page_from_statement() {
    let txns = read_operations(STATEMENT.as_bytes()).unwrap();
    let page = build_main_page(
        &txns,
        "15.05.2023 21:00:00",
        "1234567890123456",
        Vec::new(),
        Vec::new(),
    )
    .unwrap();

    assert_eq!(page.greeting, "Good evening");
    assert_eq!(page.card, "1234 ** 3456");
    assert_eq!(page.total_spent, 47651.0);
    assert_eq!(page.cashback, 476.0);
    assert_eq!(page.top_transactions.len(), 5);
    assert_eq!(page.top_transactions[0].amount, 50000.0);
    assert_eq!(page.top_transactions[0].category, "Пополнения");
}

#[test]
fn test_events_page_for_quiet_month_is_empty() {
    let txns = read_operations(STATEMENT.as_bytes()).unwrap();
    let page = build_events_page(&txns, "2023", "01");
    assert!(page.cashback_by_category.is_empty());
}
