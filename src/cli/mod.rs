//! Interactive console menu over the flat-file store

use std::{
    future::Future,
    io::{self, BufRead, Write},
    path::PathBuf,
    pin::Pin,
    thread,
};

use chrono::NaiveDateTime;
use clap::Parser;
use tokio::sync::mpsc;

use crate::{
    error::{AppError, AppResult},
    models::{NewVisit, Period},
    render::text::{render_registration, render_report, rule},
    services::{
        exports::{self, ExportOutcome},
        registrar, reports,
    },
    store::CsvVisitStore,
};

#[derive(Parser, Debug)]
#[command(name = "barberia-cli")]
#[command(version, about = "Barbershop visit records and reports")]
pub struct Args {
    /// CSV file holding the visit records
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Destination of the spreadsheet export
    #[arg(long, value_name = "PATH")]
    pub export_file: Option<PathBuf>,
}

const MENU_WIDTH: usize = 50;
const FORM_WIDTH: usize = 40;

const VISIT_PROMPTS: [&str; 5] = [
    "Nombre del cliente: ",
    "Servicio recibido (ej: Corte, Barba, Tinte): ",
    "Profesional que atendió: ",
    "Método de pago (Efectivo/Tarjeta/Transferencia): ",
    "Monto pagado: $",
];

/// Why the menu loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuExit {
    Quit,
    Interrupted,
    EndOfInput,
}

enum Input {
    Line(String),
    Eof,
    Interrupted,
}

impl Input {
    fn into_line(self) -> Result<String, MenuExit> {
        match self {
            Input::Line(line) => Ok(line),
            Input::Eof => Err(MenuExit::EndOfInput),
            Input::Interrupted => Err(MenuExit::Interrupted),
        }
    }
}

pub type Interrupt = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Lines typed at the console; the channel closes at end of input
pub type ConsoleLines = mpsc::Receiver<io::Result<String>>;

const LINE_BUFFER: usize = 16;

/// Read `reader` line by line on a plain OS thread.
///
/// A read blocked on the terminal never holds up runtime shutdown: the
/// thread is detached and dies with the process once the menu returns.
pub fn read_lines_in_background<R>(reader: R) -> ConsoleLines
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    thread::spawn(move || {
        for line in reader.lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

pub struct Menu<W> {
    input: ConsoleLines,
    output: W,
    store: CsvVisitStore,
    export_path: PathBuf,
    interrupt: Interrupt,
    clock: fn() -> NaiveDateTime,
}

impl<W: Write> Menu<W> {
    pub fn new(input: ConsoleLines, output: W, store: CsvVisitStore, export_path: PathBuf) -> Self {
        Self {
            input,
            output,
            store,
            export_path,
            interrupt: Box::pin(std::future::pending::<()>()),
            clock: crate::local_now,
        }
    }

    /// Stop the loop when `interrupt` completes (Ctrl-C in the binary)
    pub fn with_interrupt(mut self, interrupt: impl Future<Output = ()> + Send + 'static) -> Self {
        self.interrupt = Box::pin(interrupt);
        self
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user quits, input ends, or the interrupt fires.
    ///
    /// Failures of a single operation are printed and the loop goes on;
    /// only console I/O errors end it early.
    pub async fn run(&mut self) -> AppResult<MenuExit> {
        let exit = loop {
            self.show_menu()?;
            let choice = match self.read_line().await?.into_line() {
                Ok(choice) => choice,
                Err(exit) => break exit,
            };

            let step = match choice.trim() {
                "1" => self.register().await,
                "2" => self.report(Period::Week).await.map(|()| None),
                "3" => self.report(Period::Month).await.map(|()| None),
                "4" => self.export().await.map(|()| None),
                "5" => {
                    writeln!(self.output, "\n¡Gracias por usar el sistema! 👋")?;
                    break MenuExit::Quit;
                }
                _ => {
                    writeln!(
                        self.output,
                        "\n⚠️ Opción inválida. Por favor ingrese un número del 1 al 5."
                    )?;
                    Ok(None)
                }
            };

            match step {
                Ok(Some(exit)) => break exit,
                Ok(None) => {}
                Err(AppError::Console(e)) => return Err(AppError::Console(e)),
                Err(e) => self.report_failure(&e)?,
            }
        };

        if exit == MenuExit::Interrupted {
            writeln!(self.output, "\n\n⚠️ Operación cancelada por el usuario")?;
        }
        tracing::debug!(?exit, "Menu finished");
        Ok(exit)
    }

    fn show_menu(&mut self) -> AppResult<()> {
        let rule = rule(MENU_WIDTH);
        writeln!(self.output, "\n{}", rule)?;
        writeln!(self.output, "✂️ BARBERÍA PREMIUM - SISTEMA DE GESTIÓN ✂️")?;
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output, "1. Registrar nueva visita")?;
        writeln!(self.output, "2. Generar reporte semanal")?;
        writeln!(self.output, "3. Generar reporte mensual")?;
        writeln!(self.output, "4. Exportar datos a Excel")?;
        writeln!(self.output, "5. Salir")?;
        write!(self.output, "👉 Seleccione una opción (1-5): ")?;
        Ok(())
    }

    async fn read_line(&mut self) -> AppResult<Input> {
        self.output.flush()?;
        tokio::select! {
            line = self.input.recv() => Ok(match line {
                Some(line) => Input::Line(line?),
                None => Input::Eof,
            }),
            () = &mut self.interrupt => Ok(Input::Interrupted),
        }
    }

    async fn register(&mut self) -> AppResult<Option<MenuExit>> {
        let rule = rule(FORM_WIDTH);
        writeln!(self.output, "\n{}\nREGISTRO DE NUEVA VISITA\n{}", rule, rule)?;

        let mut answers = Vec::with_capacity(VISIT_PROMPTS.len());
        for prompt in VISIT_PROMPTS {
            write!(self.output, "{}", prompt)?;
            match self.read_line().await?.into_line() {
                Ok(answer) => answers.push(answer),
                Err(exit) => return Ok(Some(exit)),
            }
        }
        let mut answers = answers.into_iter();
        let mut next = || answers.next().unwrap_or_default();
        let visit = NewVisit {
            client_name: next(),
            service_name: next(),
            staff_name: next(),
            payment_method: next(),
            amount: next(),
        };

        let record = registrar::register_visit(&self.store, visit, (self.clock)()).await?;
        writeln!(self.output, "\n{}", render_registration(&record))?;
        Ok(None)
    }

    async fn report(&mut self, period: Period) -> AppResult<()> {
        let outcome = reports::generate_report(&self.store, period, (self.clock)()).await?;
        writeln!(self.output, "\n{}", render_report(&outcome))?;
        Ok(())
    }

    async fn export(&mut self) -> AppResult<()> {
        match exports::export_spreadsheet(&self.store, &self.export_path).await? {
            ExportOutcome::Written { path, .. } => writeln!(
                self.output,
                "\n✅ Excel exportado exitosamente a: {}",
                path.display()
            )?,
            ExportOutcome::NoData => writeln!(self.output, "\n⚠️ No hay datos para exportar")?,
        }
        Ok(())
    }

    fn report_failure(&mut self, error: &AppError) -> AppResult<()> {
        match error {
            AppError::Validation(message) => writeln!(self.output, "\n⚠️ Error: {}", message)?,
            other => {
                tracing::error!(error = %other, "Operation failed");
                writeln!(self.output, "\n⚠️ Error inesperado: {}", other)?;
            }
        }
        Ok(())
    }
}
