//! Narrative panels: contextual factors, 2030 objectives and the synthesis.

use super::{TextBlock, TextSection};

type Entry = (&'static str, &'static [&'static str]);

const SOCIO_CULTURAL_FACTORS: &[Entry] = &[
    (
        "Traditions et rituels",
        &[
            "Consommation cérémonielle",
            "Importance sociale",
            "Transmission générationnelle",
        ],
    ),
    (
        "Normes sociales",
        &["Tolérance élevée", "Stigmatisation faible", "Pression des pairs"],
    ),
    (
        "Contexte économique",
        &[
            "Prix relativement bas",
            "Accessibilité importante",
            "Marketing agressif",
        ],
    ),
];

const STRUCTURAL_FACTORS: &[Entry] = &[
    (
        "Offre de soins",
        &[
            "Disparités territoriales",
            "Accès aux CSAPA",
            "Médecins addictologues",
        ],
    ),
    (
        "Prévention",
        &["Campagnes adaptées", "Éducation scolaire", "Dépistage précoce"],
    ),
    (
        "Régulation",
        &[
            "Application des lois",
            "Contrôles de vente",
            "Prévention commerciale",
        ],
    ),
];

const CONSUMPTION_OBJECTIVES: &[Entry] = &[
    (
        "Objectifs quantitatifs",
        &[
            "-20% consommation globale",
            "-30% binge drinking",
            "-25% dépendance alcool",
        ],
    ),
    (
        "Cibles prioritaires",
        &[
            "Jeunes 15-25 ans",
            "Femmes enceintes",
            "Populations vulnérables",
        ],
    ),
];

const CARE_OBJECTIVES: &[Entry] = &[
    (
        "Couverture territoriale",
        &[
            "100% CSAPA accessibles",
            "Délais < 15 jours",
            "Télémédecine généralisée",
        ],
    ),
    (
        "Qualité des soins",
        &[
            "Formation spécifique",
            "Prise en charge globale",
            "Suivi à long terme",
        ],
    ),
];

const PREVENTION_OBJECTIVES: &[Entry] = &[
    (
        "Éducation",
        &[
            "Programmes scolaires",
            "Formation enseignants",
            "Sensibilisation parents",
        ],
    ),
    (
        "Communautaire",
        &[
            "Leaders d'opinion",
            "Associations locales",
            "Médias territoriaux",
        ],
    ),
];

const ALARMING_SITUATION: &[Entry] = &[
    (
        "Problématiques majeures",
        &[
            "Consommation supérieure à la métropole",
            "Binge drinking très élevé chez les jeunes",
            "Initiation précoce préoccupante",
            "Mortalité liée significative",
        ],
    ),
    (
        "Facteurs aggravants",
        &[
            "Traditions culturelles ancrées",
            "Accessibilité importante",
            "Offre de soins insuffisante",
            "Prévention inadaptée",
        ],
    ),
];

const ACTION_LEVERS: &[Entry] = &[
    (
        "Atouts territoriaux",
        &[
            "Structures communautaires fortes",
            "Leadership local engagé",
            "Expériences pilotes prometteuses",
        ],
    ),
    (
        "Opportunités",
        &[
            "Plans nationaux spécifiques",
            "Financements dédiés",
            "Coopération régionale",
            "Innovation numérique",
        ],
    ),
];

const URGENT_RECOMMENDATIONS: &[Entry] = &[
    (
        "Priorité 1 - Prévention ciblée",
        &[
            "Programmes scolaires adaptés aux cultures locales",
            "Campagnes média avec leaders d'opinion territoriaux",
            "Prévention communautaire par les pairs",
        ],
    ),
    (
        "Priorité 2 - Soins accessibles",
        &[
            "Renforcement des CSAPA dans tous les territoires",
            "Déploiement de la télémédecine addictologique",
            "Formation des professionnels de santé de première ligne",
        ],
    ),
    (
        "Priorité 3 - Régulation adaptée",
        &[
            "Contrôles renforcés de la vente aux mineurs",
            "Encadrement de la publicité proximité écoles",
            "Politique prix cohérente entre territoires",
        ],
    ),
    (
        "Échéance",
        &["Plan d'action opérationnel pour 2024"],
    ),
];

fn block(title: &str, entries: &[Entry]) -> TextBlock {
    TextBlock {
        title: title.to_string(),
        sections: entries
            .iter()
            .map(|(heading, items)| TextSection {
                heading: heading.to_string(),
                items: items.iter().map(|s| s.to_string()).collect(),
            })
            .collect(),
    }
}

pub fn contextual_factors() -> Vec<TextBlock> {
    vec![
        block("Facteurs socio-culturels", SOCIO_CULTURAL_FACTORS),
        block("Facteurs structurels", STRUCTURAL_FACTORS),
    ]
}

pub fn objectives_2030() -> Vec<TextBlock> {
    vec![
        block("Réduction consommation", CONSUMPTION_OBJECTIVES),
        block("Amélioration soins", CARE_OBJECTIVES),
        block("Renforcement prévention", PREVENTION_OBJECTIVES),
    ]
}

pub fn synthesis() -> Vec<TextBlock> {
    vec![
        block("Situation alarmante", ALARMING_SITUATION),
        block("Leviers d'action", ACTION_LEVERS),
        block("Recommandations urgentes", URGENT_RECOMMENDATIONS),
    ]
}
