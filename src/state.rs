use crate::models::CounterSnapshot;

#[derive(Debug, Default)]
pub struct PollerState {
    previous: Option<CounterSnapshot>,
}

impl PollerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous(&self, name: &str) -> Option<u64> {
        self.previous.as_ref().and_then(|snapshot| snapshot.get(name))
    }

    pub fn snapshot(&self) -> Option<&CounterSnapshot> {
        self.previous.as_ref()
    }

    pub fn retain(&mut self, next: CounterSnapshot) {
        self.previous = Some(next);
    }
}
