use super::domain::Grade;

/// A weighted group of gradable items.
#[derive(Debug, PartialEq, Eq)]
pub struct SectionTemplate {
    pub ordinal: u8,
    pub name: &'static str,
    pub weight_percent: u8,
    pub items: &'static [&'static str],
}

impl SectionTemplate {
    /// Nominal weight as a fraction of the final score.
    pub fn weight(&self) -> f64 {
        f64::from(self.weight_percent) / 100.0
    }

    pub fn title(&self) -> String {
        format!("{}. {} ({}%)", self.ordinal, self.name, self.weight_percent)
    }
}

/// Fixed grading instrument: sections, items, and the static texts that
/// accompany them on the printed form.
#[derive(Debug, PartialEq, Eq)]
pub struct Instrument {
    pub institution: &'static str,
    pub faculty: &'static str,
    pub title: &'static str,
    pub instructions: &'static str,
    pub sections: &'static [SectionTemplate],
    pub pass_threshold: Grade,
}

impl Instrument {
    pub fn rosario() -> &'static Instrument {
        &ROSARIO
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|section| section.items.len()).sum()
    }

    pub fn items(&self) -> impl Iterator<Item = (&'static SectionTemplate, &'static str)> {
        let sections: &'static [SectionTemplate] = self.sections;
        sections
            .iter()
            .flat_map(|section| section.items.iter().map(move |item| (section, *item)))
    }

    /// Resolves a free-form label to the canonical item text.
    pub fn find_item(&self, label: &str) -> Option<&'static str> {
        let wanted = normalize_label(label);
        self.items()
            .map(|(_, item)| item)
            .find(|item| normalize_label(item) == wanted)
    }
}

pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

const fn weight_total(sections: &[SectionTemplate]) -> u32 {
    let mut total = 0;
    let mut index = 0;
    while index < sections.len() {
        total += sections[index].weight_percent as u32;
        index += 1;
    }
    total
}

const ROSARIO_SECTIONS: &[SectionTemplate] = &[
    SectionTemplate {
        ordinal: 1,
        name: "CONOCIMIENTOS",
        weight_percent: 35,
        items: &[
            "1.1 Conocimientos ciencias",
            "1.2 Conocimientos clínicos generales",
            "1.3 Conocimientos de fisiopatología",
            "1.4 Conocimientos de terapéutica",
            "1.5 Conocimientos de la especialidad específicos al final de la rotación",
        ],
    },
    SectionTemplate {
        ordinal: 2,
        name: "HABILIDADES EN LA PRÁCTICA CLÍNICA",
        weight_percent: 35,
        items: &[
            "2.1 Elaboración de historias clínicas",
            "2.2 Práctica del examen físico de rutina",
            "2.3 Habilidad de la práctica de procedimientos diagnósticos especiales",
            "2.4 Conocimientos de las historias clínicas de sus pacientes",
            "2.5 Interpretación de exámenes clínicos y paraclínicos",
            "2.6 Habilidad y técnica en procedimientos médicos o quirúrgicos",
            "2.7 Participación en reuniones científicas",
            "2.8 Elaboración de informes",
            "2.9 Criterio clínico y terapéutico",
        ],
    },
    SectionTemplate {
        ordinal: 3,
        name: "ACTITUDES Y VALORES",
        weight_percent: 30,
        items: &[
            "3.1 Relaciones con los pacientes y sus familias",
            "3.2 Relaciones con el personal del escenario de práctica",
            "3.3 Relaciones con sus compañeros y personal en formación",
            "3.4 Relaciones con sus docentes y superiores",
            "3.5 Responsabilidad en el cuidado de los pacientes",
            "3.6 Responsabilidad en las actividades médicas de rutina",
            "3.7 Cumplimiento",
            "3.8 Iniciativa",
        ],
    },
];

const _: () = assert!(weight_total(ROSARIO_SECTIONS) == 100);

static ROSARIO: Instrument = Instrument {
    institution: "Universidad del Rosario",
    faculty: "Escuela de Medicina y Ciencias de la Salud",
    title: "Formato de Calificación – Especializaciones Médico Quirúrgicas",
    instructions: "Coloque en frente del parámetro a evaluar la calificación obtenida por el residente \
siendo 0,0 la más baja y 5,0 la más alta. La mínima nota aprobatoria es 3,0. \
Para la calificación final: Conocimientos 35%, Habilidades 35%, Actitudes/Valores 30%.",
    sections: ROSARIO_SECTIONS,
    pass_threshold: Grade::from_hundredths(300),
};
