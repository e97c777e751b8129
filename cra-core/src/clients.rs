use crate::error::ValidationError;
use log::debug;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(pub u32);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
}

/// Clients of the session, in creation order.
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    clients: Vec<Client>,
    last_id: u32,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a client under `name`, trimmed. Blank names are rejected.
    pub fn add(&mut self, name: &str) -> Result<&Client, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.last_id += 1;
        let client = Client {
            id: ClientId(self.last_id),
            name: name.to_string(),
        };
        debug!("event=client_added id={}", client.id);
        self.clients.push(client);
        Ok(&self.clients[self.clients.len() - 1])
    }

    pub fn get(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: ClientId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Client> {
        self.clients.iter()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_numbers_clients() {
        let mut clients = ClientRegistry::new();
        clients.add(" Acme ").unwrap();
        clients.add("Globex").unwrap();

        let names: Vec<&str> = clients.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Globex"]);
        assert_eq!(clients.get(ClientId(2)).unwrap().name, "Globex");
        assert!(!clients.contains(ClientId(3)));
    }

    #[test]
    fn add_rejects_blank_names() {
        let mut clients = ClientRegistry::new();
        assert_eq!(clients.add("  ").unwrap_err(), ValidationError::EmptyName);
        assert!(clients.is_empty());
    }
}
