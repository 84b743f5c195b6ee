use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use std::fmt::Write;

/// Soles per US dollar quoted to the model.
pub const USD_TO_PEN_RATE: &str = "S/.3.67";

pub const OUT_OF_SCOPE_REPLY: &str =
    "Lo siento, solo puedo ayudarte con operaciones de registro de finanzas personales.";

const PREAMBLE_ROLE: &str = "### Rol:\n\
                             Eres un Asistente de Finanzas Personales. Tu función es ayudar al usuario a registrar \
                             sus ingresos y egresos, clasificarlos automáticamente por categoría y ofrecer consejos \
                             para mejorar sus finanzas.\n\n";

const PREAMBLE_SCOPE: &str = "### Ámbito de Respuesta:\n\
                              Solo puedes responder y procesar preguntas relacionadas con las transacciones de finanzas. \
                              Esto incluye:\n\
                              - Registro de ingresos.\n\
                              - Registro de gastos.\n\
                              - Responder tips de finanzas personales.\n\n\
                              Puedes usar emojis para respuestas mas amigables.\n\n";

const PREAMBLE_NOTES: &str = "### Notas adicionales:\n\
                              - Siempre manten un tono amigable y profesional.\n\
                              - Asegurate de que las respuestas sean claras y directas.\n\
                              - Usa las herramientas proporcionadas para procesar la operación.\n\
                              - Responde con un objeto JSON {\"response\": <texto>, \"registered\": <true|false>}.\n";

static TIMEZONE: Lazy<String> =
    Lazy::new(|| iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string()));

pub fn build_preamble(now: DateTime<Local>, tool_name: &str) -> String {
    let mut preamble = String::with_capacity(2048);
    preamble.push_str(PREAMBLE_ROLE);

    let _ = write!(
        preamble,
        "### Variables del sistema:\n\
         - Fecha actual: {} ({})\n\
         - Tipo de cambio de dólares a soles: {}\n\n",
        now.format("%Y-%m-%d %H:%M:%S"),
        *TIMEZONE,
        USD_TO_PEN_RATE
    );

    preamble.push_str(PREAMBLE_SCOPE);
    preamble.push_str("### Instrucciones especificas:\n\n");
    let _ = write!(
        preamble,
        "#### 1.- Registro de ingresos:\n\
         Si el usuario envia una peticion de registrar un ingreso, utiliza la herramienta {tool} \
         con tipo \"ingreso\" para registrar la transaccion. Ejemplo:\n\
         \"Registra un ingreso de S/.XXXX soles\"\n\n\
         #### 2.- Registro de gastos:\n\
         Si el usuario envia una peticion de registrar un gasto o egreso, utiliza la herramienta {tool} \
         con tipo \"gasto\" para registrar la transaccion. Ejemplo:\n\
         \"Registra un gasto de S/.XXXX soles\"\n\
         Si el monto esta en dolares, conviertelo a soles con el tipo de cambio indicado.\n\
         Si el usuario no indica la fecha, usa la fecha actual.\n\n",
        tool = tool_name
    );
    let _ = write!(
        preamble,
        "#### 3.- Consultas fuera de ambito:\n\
         Si el usuario hace preguntas fuera de ese tema, responde con:\n\
         \"{}\"\n\n\
         #### 4.- Responder con un tip de finanzas personales:\n\
         Al final de la respuesta de la transacción agregar un tip de finanzas personales. Ejemplo:\n\
         \"Tip: <mensaje de finanzas>\"\n\n",
        OUT_OF_SCOPE_REPLY
    );

    preamble.push_str(PREAMBLE_NOTES);
    preamble
}
