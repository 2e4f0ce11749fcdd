use crate::core::component::Component;
use crate::core::connections::port_validator::PortValidator;
use crate::core::errors::ConnectionFault;
use crate::core::types::{ComponentId, ConnectionId, InputPort, OutputPort};
use std::collections::HashMap;

/// Centralized connection validation shared by interactive edits and loads
pub struct ConnectionValidator;

impl ConnectionValidator {
    /// Validate a prospective wire between two (possibly missing) components.
    ///
    /// Checks run in a fixed order: existence, self connection, source
    /// port, target port. Fan-in is checked separately by
    /// [`ConnectionValidator::check_input_port_collision`].
    pub fn validate_connection(
        source: &OutputPort,
        source_component: Option<&Component>,
        target: &InputPort,
        target_component: Option<&Component>,
    ) -> Result<(), ConnectionFault> {
        let source_component = source_component.ok_or_else(|| ConnectionFault::UnknownPort {
            component: source.component_id().clone(),
            port: source.port_name().to_string(),
        })?;
        let target_component = target_component.ok_or_else(|| ConnectionFault::UnknownPort {
            component: target.component_id().clone(),
            port: target.port_name().to_string(),
        })?;

        if source.component_id() == target.component_id() {
            return Err(ConnectionFault::SelfConnection(source.component_id().clone()));
        }

        PortValidator::validate_source_port(source_component, source.port_name())?;
        PortValidator::validate_target_port(target_component, target.port_name())?;

        Ok(())
    }

    /// Check if an input port is already connected (prevents multiple drivers)
    pub fn check_input_port_collision(
        input_sources: &HashMap<(ComponentId, String), ConnectionId>,
        target: &InputPort,
    ) -> Result<(), ConnectionFault> {
        let key = (target.component_id().clone(), target.port_name().to_string());
        if let Some(existing) = input_sources.get(&key) {
            return Err(ConnectionFault::PortAlreadyBound {
                component: target.component_id().clone(),
                port: target.port_name().to_string(),
                existing: existing.clone(),
            });
        }
        Ok(())
    }
}
