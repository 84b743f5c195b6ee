use super::error::ToolError;
use crate::entity::NewTransaction;
use crate::store::TransactionStore;
use rig::{completion::ToolDefinition, tool::Tool};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

pub const REJECTED_MESSAGE: &str =
    "No se pudo registrar la transacción por falta de parametros correctos.";
pub const REGISTERED_MESSAGE: &str = "Se registro la transacción.";

/// Owner recorded on every row until per-user accounts exist.
const PLACEHOLDER_USERNAME: &str = "usuario";

/// Arguments as extracted by the model. Any JSON scalar is accepted and kept
/// in its textual form; only a literal empty string (or an absent/null value)
/// counts as missing.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RegisterTransactionArgs {
    #[serde(default, deserialize_with = "scalar_to_string")]
    pub category: String,
    #[serde(default, deserialize_with = "scalar_to_string")]
    pub description: String,
    #[serde(default, deserialize_with = "scalar_to_string")]
    pub amount: String,
    #[serde(rename = "type", default, deserialize_with = "scalar_to_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "scalar_to_string")]
    pub date: String,
}

impl RegisterTransactionArgs {
    fn has_empty_field(&self) -> bool {
        [
            &self.category,
            &self.description,
            &self.amount,
            &self.kind,
            &self.date,
        ]
        .iter()
        .any(|field| field.is_empty())
    }

    fn into_record(self) -> NewTransaction {
        NewTransaction {
            username: PLACEHOLDER_USERNAME.to_string(),
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
        }
    }
}

fn scalar_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Clone)]
pub struct RegisterTransaction {
    pub store: Arc<dyn TransactionStore>,
}

impl Tool for RegisterTransaction {
    const NAME: &'static str = "register_transaction";

    type Error = ToolError;
    type Args = RegisterTransactionArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Registra transaccion de gastos o ingresos personales, recibe como parametro \
                 categoria, descripcion, precio, tipo, fecha. Si no se tiene los parametros correctos \
                 se debe rechazar la transacción."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Categoria de la transaccion (comida, transporte, sueldo, ...)"
                    },
                    "description": {
                        "type": "string",
                        "description": "Descripcion breve de la transaccion"
                    },
                    "amount": {
                        "type": "string",
                        "description": "Precio o monto en soles"
                    },
                    "type": {
                        "type": "string",
                        "enum": ["ingreso", "gasto"],
                        "description": "Tipo de transaccion"
                    },
                    "date": {
                        "type": "string",
                        "description": "Fecha y hora de la transaccion (YYYY-MM-DD HH:MM:SS)"
                    }
                },
                "required": ["category", "description", "amount", "type", "date"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        if args.has_empty_field() {
            info!("Rejected transaction with missing parameters: {:?}", args);
            return Ok(REJECTED_MESSAGE.to_string());
        }

        let record = args.into_record();
        self.store
            .insert(&record)
            .await
            .map_err(|e| ToolError::StoreFailed(e.to_string()))?;

        info!(
            "Registered {} of {} ({})",
            record.kind, record.amount, record.category
        );
        Ok(REGISTERED_MESSAGE.to_string())
    }
}
