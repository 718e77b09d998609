// Application state for HTTP handlers
use crate::application::refinement_service::RefinementService;
use crate::application::workspace_service::WorkspaceService;

#[derive(Clone)]
pub struct AppState {
    pub workspace_service: WorkspaceService,
    pub refinement_service: RefinementService,
}
