use super::theme::Theme;
use chrono::NaiveDate;
use cra_core::{
    clients::ClientRegistry,
    expenses::ExpenseLedger,
    format_utils::{format_currency, format_duration},
    missions::{MissionKind, MissionRegistry},
    report::PeriodReport,
    timesheet::{Allocation, FULL_DAY, TimesheetGrid},
};
use rust_decimal::Decimal;
use termimad::{MadSkin, crossterm::style::Stylize};

#[derive(Clone)]
pub struct RenderOptions {
    pub use_color: bool,
    pub date_format: String,
    pub month_format: String,
    pub currency_symbol: String,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: Theme::skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    use_color: true,
                    date_format: "%d/%m/%Y".to_string(),
                    month_format: "%B %Y".to_string(),
                    currency_symbol: "€".to_string(),
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            print!("{md}");
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_error(&self, message: &str) {
        if self.opts.use_color {
            eprintln!("{}", message.with(Theme::ERROR));
        } else {
            eprintln!("error: {message}");
        }
    }

    pub fn print_allocation(&self, allocation: &Allocation, mission: &str) {
        let line = self.allocation_line(allocation, mission);
        if self.opts.use_color {
            println!("{}", line.with(Theme::SUCCESS));
        } else {
            println!("{line}");
        }
        for warning in allocation_warnings(allocation) {
            if self.opts.use_color {
                println!("  {}", warning.with(Theme::WARNING));
            } else {
                println!("  {warning}");
            }
        }
    }

    pub fn print_clients(&self, clients: &ClientRegistry) {
        if clients.is_empty() {
            self.print_info("No clients yet.");
            return;
        }
        self.print_md(&clients_md(clients));
    }

    pub fn print_missions(&self, missions: &MissionRegistry, clients: &ClientRegistry) {
        if missions.is_empty() {
            self.print_info("No missions yet.");
            return;
        }
        self.print_md(&self.missions_md(missions, clients));
    }

    pub fn print_grid(&self, grid: &TimesheetGrid, reference: NaiveDate) {
        if grid.rows.is_empty() {
            self.print_info("No missions yet: add one with `mission regie` or `mission forfait`.");
            return;
        }
        self.print_md(&self.grid_md(grid, reference));
    }

    pub fn print_expenses(&self, expenses: &ExpenseLedger, missions: &MissionRegistry) {
        if expenses.is_empty() {
            self.print_info("No expenses yet.");
            return;
        }
        self.print_md(&self.expenses_md(expenses, missions));
    }

    pub fn print_report(&self, report: &PeriodReport) {
        self.print_md(&self.report_md(report));
    }

    fn currency(&self, amount: Decimal) -> String {
        format_currency(amount, &self.opts.currency_symbol)
    }

    fn date(&self, date: NaiveDate) -> String {
        date.format(&self.opts.date_format).to_string()
    }

    pub(crate) fn allocation_line(&self, allocation: &Allocation, mission: &str) -> String {
        if allocation.effective.is_zero() {
            format!("{} · {mission}: cleared", self.date(allocation.day))
        } else {
            format!(
                "{} · {mission}: {}",
                self.date(allocation.day),
                format_duration(allocation.effective)
            )
        }
    }

    pub(crate) fn missions_md(&self, missions: &MissionRegistry, clients: &ClientRegistry) -> String {
        let mut md = String::from("|:-:|:-|:-|:-|-:|:-:|:-:|\n");
        md.push_str("|**#**|**Mission**|**Client**|**Type**|**Rate / amount**|**Start**|**Deadline**|\n|-|\n");
        for mission in missions {
            let client = clients
                .get(mission.client)
                .map(|c| c.name.as_str())
                .unwrap_or("?");
            let price = match &mission.kind {
                MissionKind::Regie {
                    daily_rate,
                    max_days,
                } => format!("{}/day, max {max_days} days", self.currency(*daily_rate)),
                MissionKind::Forfait { amount } => self.currency(*amount),
            };
            md.push_str(&format!(
                "|{}|{}|{}|{}|{}|{}|{}|\n",
                mission.id,
                escape(&mission.name),
                escape(client),
                mission.kind.label(),
                price,
                self.date(mission.start_date),
                self.date(mission.deadline),
            ));
        }
        md.push_str("|-|\n");
        md
    }

    /// Days as rows and missions as columns, so a month fits the terminal width.
    pub(crate) fn grid_md(&self, grid: &TimesheetGrid, reference: NaiveDate) -> String {
        let mut md = format!("# {}\n", reference.format(&self.opts.month_format));

        md.push_str("|:-|");
        md.push_str(&":-:|".repeat(grid.rows.len()));
        md.push_str("-:|\n|**Day**|");
        for row in &grid.rows {
            md.push_str(&format!("**#{} {}**|", row.mission, escape(&row.label)));
        }
        md.push_str("**Total**|\n|-|\n");

        for (i, day) in grid.days.iter().enumerate() {
            md.push_str(&format!("|{}|", day.format("%a %d")));
            for row in &grid.rows {
                match row.cells[i] {
                    Some(duration) => md.push_str(&format!("`{}`|", format_duration(duration))),
                    None => md.push('|'),
                }
            }
            let total = grid.day_totals[i];
            if total > FULL_DAY {
                md.push_str(&format!("**{}!**|\n", format_duration(total)));
            } else if total.is_zero() {
                md.push_str("|\n");
            } else {
                md.push_str(&format!("{}|\n", format_duration(total)));
            }
        }

        md.push_str("|-|\n|**Total**|");
        for row in &grid.rows {
            md.push_str(&format!("**{}**|", format_duration(row.total)));
        }
        md.push_str(&format!("**{}**|\n|-|\n", format_duration(grid.total())));
        md
    }

    pub(crate) fn expenses_md(&self, expenses: &ExpenseLedger, missions: &MissionRegistry) -> String {
        let mut md = String::from("|:-:|:-:|:-|:-|-:|:-|\n");
        md.push_str("|**#**|**Date**|**For**|**Category**|**Amount**|**Description**|\n|-|\n");
        for expense in expenses.iter() {
            let owner = match expense.kind.mission() {
                Some(id) => missions
                    .get(id)
                    .map(|m| format!("#{} {}", id, escape(&m.name)))
                    .unwrap_or_else(|| format!("#{id}")),
                None => "*general*".to_string(),
            };
            md.push_str(&format!(
                "|{}|{}|{}|{}|{}|{}|\n",
                expense.id,
                self.date(expense.date),
                owner,
                expense.kind.category_label(),
                self.currency(expense.amount),
                escape(&expense.description),
            ));
        }
        md.push_str("|-|\n");

        let totals = expenses.totals_by_mission();
        if !totals.is_empty() {
            md.push_str("\n## Per mission\n");
            for (id, total) in &totals {
                let name = missions.get(*id).map(|m| m.name.as_str()).unwrap_or("?");
                md.push_str(&format!("* #{id} {}: `{}`\n", escape(name), self.currency(*total)));
            }
        }
        md.push_str(&format!(
            "\nGeneral expenses: `{}`\n",
            self.currency(expenses.general_total())
        ));
        md
    }

    pub(crate) fn report_md(&self, report: &PeriodReport) -> String {
        let mut md = format!(
            "# Summary {} – {}\n",
            self.date(report.from),
            self.date(report.to)
        );
        md.push_str("|:-:|:-|-:|-:|-:|\n");
        md.push_str("|**#**|**Mission**|**Days**|**Billable**|**Expenses**|\n|-|\n");
        for summary in &report.missions {
            let days = if summary.days_over_max > Decimal::ZERO {
                format!(
                    "{} (**+{} over max**)",
                    format_duration(summary.days),
                    format_duration(summary.days_over_max)
                )
            } else {
                format_duration(summary.days)
            };
            md.push_str(&format!(
                "|{}|{}|{}|{}|{}|\n",
                summary.mission,
                escape(&summary.name),
                days,
                self.currency(summary.billable),
                self.currency(summary.expenses),
            ));
        }
        md.push_str(&format!(
            "|-|\n|**Total**||**{}**|**{}**|**{}**|\n|-|\n",
            format_duration(report.total_days()),
            self.currency(report.total_billable()),
            self.currency(report.total_expenses()),
        ));
        md.push_str(&format!(
            "\nGeneral expenses: `{}`\n",
            self.currency(report.general_expenses)
        ));
        md
    }
}

fn clients_md(clients: &ClientRegistry) -> String {
    let mut md = String::from("|:-:|:-|\n|**#**|**Client**|\n|-|\n");
    for client in clients.iter() {
        md.push_str(&format!("|{}|{}|\n", client.id, escape(&client.name)));
    }
    md.push_str("|-|\n");
    md
}

fn allocation_warnings(allocation: &Allocation) -> Vec<String> {
    let mut warnings = Vec::new();
    if allocation.was_truncated() {
        warnings.push(format!(
            "requested {}, only {} left on that day",
            format_duration(allocation.requested),
            format_duration(allocation.effective)
        ));
    }
    for rescaled in &allocation.rescaled {
        warnings.push(format!(
            "mission #{} rescaled from {} to {}",
            rescaled.mission,
            format_duration(rescaled.from),
            format_duration(rescaled.to)
        ));
    }
    warnings
}

/// Pipes would split a table cell.
fn escape(text: &str) -> String {
    text.replace('|', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cra_core::{
        missions::{MissionId, NewMission},
        timesheet::DayAllocationLedger,
    };

    fn plain() -> Renderer {
        Renderer::new(Some(RenderOptions {
            use_color: false,
            date_format: "%d/%m/%Y".to_string(),
            month_format: "%m/%Y".to_string(),
            currency_symbol: "€".to_string(),
        }))
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn registries() -> (ClientRegistry, MissionRegistry, MissionId) {
        let mut clients = ClientRegistry::new();
        let client = clients.add("Acme | Co").unwrap().id;
        let mut missions = MissionRegistry::new();
        let id = missions
            .add(
                NewMission {
                    name: "Audit".to_string(),
                    client,
                    kind: MissionKind::Regie {
                        daily_rate: Decimal::new(1250, 0),
                        max_days: 10,
                    },
                    start_date: date(1),
                    deadline: date(31),
                },
                &clients,
            )
            .unwrap()
            .id;
        (clients, missions, id)
    }

    #[test]
    fn missions_table_shows_prices_the_french_way() {
        let (clients, missions, _) = registries();
        let md = plain().missions_md(&missions, &clients);
        assert!(md.contains("|1|Audit|Acme / Co|Régie|1\u{202f}250,00\u{a0}€/day, max 10 days|01/03/2025|31/03/2025|"));
    }

    #[test]
    fn grid_lists_days_as_rows() {
        let (_, missions, id) = registries();
        let ledger = DayAllocationLedger::new().set_entry(date(3), id, Decimal::new(5, 1));
        let grid = TimesheetGrid::build(&missions, &ledger, cra_core::dates::month_days(date(1)));

        let md = plain().grid_md(&grid, date(1));

        assert!(md.starts_with("# 03/2025\n"));
        assert!(md.contains("|**Day**|**#1 Audit**|**Total**|"));
        assert!(md.contains("|Mon 03|`0.5`|0.5|"));
        assert!(md.contains("|Sun 02|||"));
        assert!(md.contains("|**Total**|**0.5**|**0.5**|"));
    }

    #[test]
    fn allocation_mentions_truncation() {
        let (_, _, id) = registries();
        let ledger = DayAllocationLedger::new().set_entry(date(3), MissionId(9), Decimal::new(9, 1));
        let allocation = ledger.allocate(date(3), id, Decimal::new(5, 1));

        let renderer = plain();
        assert_eq!(renderer.allocation_line(&allocation, "#1 Audit"), "03/03/2025 · #1 Audit: 0.1");
        assert_eq!(
            allocation_warnings(&allocation),
            vec!["requested 0.5, only 0.1 left on that day".to_string()]
        );
    }
}
