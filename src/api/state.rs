use crate::queue::SchedulingService;

#[derive(Clone, Default)]
pub struct AppState {
    pub service: SchedulingService,
}

impl AppState {
    pub fn new(service: SchedulingService) -> Self {
        Self { service }
    }
}
