//! Markup for the transactions page: filter controls and the transactions table.

use maud::{Markup, html};

use crate::{
    api::{ListQuery, Period},
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, FILTER_ACTIVE_STYLE, FILTER_INACTIVE_STYLE, LINK_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
    },
};

use super::{
    categories::profile,
    models::{PersistedTransaction, TransactionType},
};

fn filter_url(period: Period, kind: Option<TransactionType>) -> String {
    let type_value = match kind {
        Some(kind) => kind.as_str(),
        None => "all",
    };

    format!(
        "{}?period={}&type={type_value}",
        endpoints::TRANSACTIONS_VIEW,
        period.as_query_value()
    )
}

/// Render the period and type filter controls.
///
/// The selection lives entirely in the page's query string: clicking a pill
/// navigates with the updated query, which re-issues the remote fetch.
pub(super) fn filter_controls(query: &ListQuery) -> Markup {
    html! {
        div class="flex flex-col gap-2 w-full max-w-4xl mb-4"
        {
            div id="period-filter" class="flex flex-row gap-2"
            {
                @for period in Period::ALL_PERIODS {
                    a
                        href=(filter_url(period, query.kind))
                        class=(if query.period == period { FILTER_ACTIVE_STYLE } else { FILTER_INACTIVE_STYLE })
                    {
                        (period.label())
                    }
                }
            }

            div id="type-filter" class="flex flex-row gap-2"
            {
                a
                    href=(filter_url(query.period, None))
                    class=(if query.kind.is_none() { FILTER_ACTIVE_STYLE } else { FILTER_INACTIVE_STYLE })
                {
                    "All"
                }

                @for kind in TransactionType::ALL {
                    a
                        href=(filter_url(query.period, Some(kind)))
                        class=(if query.kind == Some(kind) { FILTER_ACTIVE_STYLE } else { FILTER_INACTIVE_STYLE })
                    {
                        (kind.label())
                    }
                }
            }
        }
    }
}

/// Render the transactions table.
pub(super) fn transactions_table(transactions: &[PersistedTransaction]) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md sm:rounded-lg w-full max-w-4xl"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Paid with" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) colspan="7"
                            {
                                "No transactions for this filter. Add one to get started."
                            }
                        }
                    }

                    @for transaction in transactions {
                        (transaction_row(transaction))
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &PersistedTransaction) -> Markup {
    let date_only = transaction
        .date
        .split('T')
        .next()
        .unwrap_or(&transaction.date);
    let edit_url =
        endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (date_only) }

            td class=(TABLE_CELL_STYLE)
            {
                span class=(profile(transaction.kind).badge_class)
                {
                    (transaction.kind.label())
                }
            }

            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            td class=(TABLE_CELL_STYLE) { (transaction.payment_method.label()) }
            td class=(TABLE_CELL_STYLE) { (format_currency(transaction.amount)) }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex flex-row gap-4"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        class=(BUTTON_DELETE_STYLE)
                        hx-delete=(delete_url)
                        hx-confirm="Delete this transaction? This cannot be undone."
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{
        api::{ListQuery, Period},
        transaction::models::{PaymentMethod, PersistedTransaction, TransactionType},
    };

    use super::{filter_controls, transactions_table};

    #[test]
    fn filter_controls_mark_the_active_selection() {
        let markup = filter_controls(&ListQuery {
            period: Period::Year,
            kind: Some(TransactionType::Income),
        });
        let document = Html::parse_fragment(&markup.into_string());

        let selector = Selector::parse("a").unwrap();
        let active: Vec<String> = document
            .select(&selector)
            .filter(|link| {
                link.value()
                    .attr("class")
                    .is_some_and(|class| class.contains("bg-blue-600"))
            })
            .map(|link| link.text().collect())
            .collect();

        assert_eq!(active, vec!["This year", "Income"]);
    }

    #[test]
    fn filter_links_carry_period_and_type_query() {
        let markup = filter_controls(&ListQuery {
            period: Period::Month,
            kind: None,
        });
        let document = Html::parse_fragment(&markup.into_string());

        let selector = Selector::parse("#period-filter a").unwrap();
        let first_href = document
            .select(&selector)
            .next()
            .and_then(|link| link.value().attr("href"))
            .expect("want period links");

        assert_eq!(first_href, "/transactions?period=week&type=all");
    }

    #[test]
    fn table_shows_an_empty_state() {
        let markup = transactions_table(&[]);
        let document = Html::parse_fragment(&markup.into_string());

        let text: String = document.root_element().text().collect();
        assert!(text.contains("No transactions for this filter"));
    }

    #[test]
    fn rows_render_date_only_and_formatted_amount() {
        let transaction = PersistedTransaction {
            id: 5,
            kind: TransactionType::Expense,
            category: "Food".to_owned(),
            amount: 12.3,
            description: "lunch".to_owned(),
            date: "2025-06-01T12:00:00.000Z".to_owned(),
            payment_method: PaymentMethod::Card,
            created_at: None,
        };
        let markup = transactions_table(&[transaction]);
        let document = Html::parse_fragment(&markup.into_string());

        let text: String = document.root_element().text().collect();
        assert!(text.contains("2025-06-01"), "want date-only date");
        assert!(!text.contains("12:00:00"), "want time component dropped");
        assert!(text.contains("$12.30"), "want formatted amount");

        let edit_selector = Selector::parse("a[href=\"/transactions/5/edit\"]").unwrap();
        assert_eq!(document.select(&edit_selector).count(), 1);

        let delete_selector =
            Selector::parse("button[hx-delete=\"/api/transactions/5\"]").unwrap();
        assert_eq!(document.select(&delete_selector).count(), 1);
    }
}
