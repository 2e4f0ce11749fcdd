use crate::core::component::Component;
use crate::core::components::types::PortType;
use crate::core::errors::ConnectionFault;

/// Port validation utilities for components
pub struct PortValidator;

impl PortValidator {
    /// Validate that a component has the specified output port
    pub fn validate_source_port(component: &Component, port: &str) -> Result<(), ConnectionFault> {
        if component.has_output_port(port) {
            return Ok(());
        }
        if component.has_input_port(port) {
            log::warn!(
                "Port '{}' on '{}' is an input and cannot drive a wire. Valid output ports: {:?}",
                port,
                component.id(),
                component.output_ports()
            );
            return Err(ConnectionFault::InvalidPortDirection {
                component: component.id().clone(),
                port: port.to_string(),
                expected: PortType::Output,
            });
        }
        Err(ConnectionFault::UnknownPort {
            component: component.id().clone(),
            port: port.to_string(),
        })
    }

    /// Validate that a component has the specified input port
    pub fn validate_target_port(component: &Component, port: &str) -> Result<(), ConnectionFault> {
        if component.has_input_port(port) {
            return Ok(());
        }
        if component.has_output_port(port) {
            log::warn!(
                "Port '{}' on '{}' is an output and cannot receive a wire. Valid input ports: {:?}",
                port,
                component.id(),
                component.input_ports()
            );
            return Err(ConnectionFault::InvalidPortDirection {
                component: component.id().clone(),
                port: port.to_string(),
                expected: PortType::Input,
            });
        }
        Err(ConnectionFault::UnknownPort {
            component: component.id().clone(),
            port: port.to_string(),
        })
    }
}
