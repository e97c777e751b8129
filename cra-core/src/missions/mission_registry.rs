use super::mission::{Mission, MissionId, MissionKind, NewMission};
use crate::{
    clients::{ClientId, ClientRegistry},
    error::ValidationError,
};
use log::debug;

/// Missions of the session, in creation order.
#[derive(Debug, Clone, Default)]
pub struct MissionRegistry {
    missions: Vec<Mission>,
    last_id: u32,
}

impl MissionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and registers a new mission.
    ///
    /// The name is trimmed and must not be empty, the client must exist, the
    /// rate or amount must lie in `(0, MAX_AMOUNT]`, the régie maximum must be
    /// positive and the deadline cannot precede the start date.
    ///
    /// [`MAX_AMOUNT`]: crate::error::MAX_AMOUNT
    pub fn add(
        &mut self,
        input: NewMission,
        clients: &ClientRegistry,
    ) -> Result<&Mission, ValidationError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !clients.contains(input.client) {
            return Err(ValidationError::UnknownClient(input.client));
        }
        match &input.kind {
            MissionKind::Regie {
                daily_rate,
                max_days,
            } => {
                ValidationError::check_amount("daily rate", *daily_rate)?;
                if *max_days == 0 {
                    return Err(ValidationError::NotPositive {
                        field: "maximum number of days",
                    });
                }
            }
            MissionKind::Forfait { amount } => {
                ValidationError::check_amount("amount", *amount)?;
            }
        }
        if input.deadline < input.start_date {
            return Err(ValidationError::DeadlineBeforeStart {
                start: input.start_date,
                deadline: input.deadline,
            });
        }

        self.last_id += 1;
        let mission = Mission {
            id: MissionId(self.last_id),
            name: name.to_string(),
            client: input.client,
            kind: input.kind,
            start_date: input.start_date,
            deadline: input.deadline,
        };
        debug!(
            "event=mission_added id={} client={} kind={}",
            mission.id,
            mission.client,
            mission.kind.label()
        );
        self.missions.push(mission);
        Ok(&self.missions[self.missions.len() - 1])
    }

    pub fn get(&self, id: MissionId) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: MissionId) -> bool {
        self.get(id).is_some()
    }

    pub fn for_client(&self, client: ClientId) -> impl Iterator<Item = &Mission> {
        self.missions.iter().filter(move |m| m.client == client)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mission> {
        self.missions.iter()
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }
}

impl<'a> IntoIterator for &'a MissionRegistry {
    type Item = &'a Mission;
    type IntoIter = std::slice::Iter<'a, Mission>;

    fn into_iter(self) -> Self::IntoIter {
        self.missions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MAX_AMOUNT;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn setup() -> (MissionRegistry, ClientRegistry, ClientId) {
        let mut clients = ClientRegistry::new();
        let client = clients.add("Acme").unwrap().id;
        (MissionRegistry::new(), clients, client)
    }

    fn regie(client: ClientId, name: &str) -> NewMission {
        NewMission {
            name: name.to_string(),
            client,
            kind: MissionKind::Regie {
                daily_rate: Decimal::new(600, 0),
                max_days: 20,
            },
            start_date: date(3, 1),
            deadline: date(3, 31),
        }
    }

    #[test]
    fn add_assigns_sequential_ids_and_trims_names() {
        let (mut missions, clients, client) = setup();
        let first = missions.add(regie(client, "  Audit  "), &clients).unwrap().id;
        let second = missions.add(regie(client, "Run"), &clients).unwrap().id;

        assert_eq!(first, MissionId(1));
        assert_eq!(second, MissionId(2));
        assert_eq!(missions.get(first).unwrap().name, "Audit");
        assert_eq!(missions.for_client(client).count(), 2);
    }

    #[test]
    fn add_rejects_unknown_client() {
        let (mut missions, clients, _) = setup();
        let err = missions.add(regie(ClientId(42), "Audit"), &clients).unwrap_err();
        assert_eq!(err, ValidationError::UnknownClient(ClientId(42)));
        assert!(missions.is_empty());
    }

    #[test]
    fn add_rejects_blank_name() {
        let (mut missions, clients, client) = setup();
        let err = missions.add(regie(client, "   "), &clients).unwrap_err();
        assert_eq!(err, ValidationError::EmptyName);
    }

    #[test]
    fn add_rejects_missing_amounts() {
        let (mut missions, clients, client) = setup();
        let mut no_rate = regie(client, "Audit");
        no_rate.kind = MissionKind::Regie {
            daily_rate: Decimal::ZERO,
            max_days: 10,
        };
        let mut no_days = regie(client, "Audit");
        no_days.kind = MissionKind::Regie {
            daily_rate: Decimal::new(500, 0),
            max_days: 0,
        };
        let mut no_amount = regie(client, "Audit");
        no_amount.kind = MissionKind::Forfait {
            amount: Decimal::ZERO,
        };

        assert!(matches!(
            missions.add(no_rate, &clients),
            Err(ValidationError::NotPositive { .. })
        ));
        assert!(matches!(
            missions.add(no_days, &clients),
            Err(ValidationError::NotPositive { .. })
        ));
        assert_eq!(
            missions.add(no_amount, &clients).unwrap_err(),
            ValidationError::NotPositive { field: "amount" }
        );
    }

    #[test]
    fn add_rejects_amounts_beyond_the_maximum() {
        let (mut missions, clients, client) = setup();
        let mut huge_rate = regie(client, "Audit");
        huge_rate.kind = MissionKind::Regie {
            daily_rate: Decimal::MAX,
            max_days: 10,
        };
        let mut huge_amount = regie(client, "Audit");
        huge_amount.kind = MissionKind::Forfait {
            amount: MAX_AMOUNT + Decimal::ONE,
        };

        assert_eq!(
            missions.add(huge_rate, &clients).unwrap_err(),
            ValidationError::TooLarge {
                field: "daily rate",
                max: MAX_AMOUNT
            }
        );
        assert!(matches!(
            missions.add(huge_amount, &clients),
            Err(ValidationError::TooLarge { field: "amount", .. })
        ));

        let mut at_the_limit = regie(client, "Audit");
        at_the_limit.kind = MissionKind::Forfait { amount: MAX_AMOUNT };
        assert!(missions.add(at_the_limit, &clients).is_ok());
    }

    #[test]
    fn add_rejects_deadline_before_start() {
        let (mut missions, clients, client) = setup();
        let mut input = regie(client, "Audit");
        input.deadline = date(2, 1);
        assert_eq!(
            missions.add(input, &clients).unwrap_err(),
            ValidationError::DeadlineBeforeStart {
                start: date(3, 1),
                deadline: date(2, 1)
            }
        );
    }
}
